use serde::{Deserialize, Serialize};

pub mod fetcher;

#[derive(PartialEq, Eq, Hash, Deserialize, Clone, Copy, Debug, Serialize)]
pub enum MetalType {
    Gold22K916,
    Gold20K833,
    Gold18K750,
    Silver,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum MetalCategory {
    Gold,
    Silver,
}

impl MetalType {
    pub const ALL: [MetalType; 4] = [
        MetalType::Gold22K916,
        MetalType::Gold20K833,
        MetalType::Gold18K750,
        MetalType::Silver,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Gold22K916 => "Gold 22K/916",
            Self::Gold20K833 => "Gold 20K/833",
            Self::Gold18K750 => "Gold 18K/750",
            Self::Silver => "Silver",
        }
    }

    pub fn category(&self) -> MetalCategory {
        match self {
            Self::Gold22K916 | Self::Gold20K833 | Self::Gold18K750 => MetalCategory::Gold,
            Self::Silver => MetalCategory::Silver,
        }
    }
}

impl MetalCategory {
    /// Floor on the making charge, not a default.
    pub fn minimum_making_charge(&self) -> f64 {
        match self {
            Self::Gold => 250.0,
            Self::Silver => 200.0,
        }
    }
}

/// Shop-wide base values. Lives behind the settings surface for the duration
/// of a session; every estimate reads the current snapshot.
#[derive(Debug, Deserialize, Clone, PartialEq, Serialize)]
pub struct RateTable {
    pub gold_22k_916: f64,
    pub gold_20k_833: f64,
    pub gold_18k_750: f64,
    pub silver_rate: f64,
    pub value_addition_gold: f64,
    pub gold_mc_per_gm: f64,
    pub silver_mc_per_gm: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::factory()
    }
}

impl RateTable {
    pub fn factory() -> Self {
        Self {
            gold_22k_916: 5500.0,
            gold_20k_833: 5044.0,
            gold_18k_750: 4564.0,
            silver_rate: 400.0,
            value_addition_gold: 13.0,
            gold_mc_per_gm: 80.0,
            silver_mc_per_gm: 8.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::factory();
    }

    pub fn rate_per_gram(&self, metal: MetalType) -> f64 {
        match metal {
            MetalType::Gold22K916 => self.gold_22k_916,
            MetalType::Gold20K833 => self.gold_20k_833,
            MetalType::Gold18K750 => self.gold_18k_750,
            MetalType::Silver => self.silver_rate,
        }
    }

    pub fn making_charge_per_gram(&self, metal: MetalType) -> f64 {
        match metal.category() {
            MetalCategory::Gold => self.gold_mc_per_gm,
            MetalCategory::Silver => self.silver_mc_per_gm,
        }
    }

    /// Suggested wastage in grams. The caller may always override it.
    pub fn suggested_wastage_gm(&self, metal: MetalType, weight_gm: f64) -> f64 {
        match metal.category() {
            MetalCategory::Gold => weight_gm * self.value_addition_gold / 100.0,
            MetalCategory::Silver => 0.0,
        }
    }

    pub fn set_rate(&mut self, metal: MetalType, rate: f64) {
        match metal {
            MetalType::Gold22K916 => self.gold_22k_916 = rate,
            MetalType::Gold20K833 => self.gold_20k_833 = rate,
            MetalType::Gold18K750 => self.gold_18k_750 = rate,
            MetalType::Silver => self.silver_rate = rate,
        }
    }

    /// Merges scraped rates into the table. Metals the fetch could not price
    /// keep their current values; non-positive rates are ignored.
    pub fn apply_fetched(&mut self, fetched: &fetcher::FetchedRates) -> Vec<MetalType> {
        let mut updated = Vec::new();
        for metal in MetalType::ALL {
            if let Some(rate) = fetched.get(metal) {
                if rate > 0.0 {
                    self.set_rate(metal, rate);
                    updated.push(metal);
                }
            }
        }
        updated
    }
}

#[cfg(test)]
mod rate_table_tests {
    use super::fetcher::FetchedRates;
    use super::*;

    #[test]
    fn test_rate_lookup_matches_table_fields() {
        let table = RateTable::factory();
        assert_eq!(table.rate_per_gram(MetalType::Gold22K916), 5500.0);
        assert_eq!(table.rate_per_gram(MetalType::Gold20K833), 5044.0);
        assert_eq!(table.rate_per_gram(MetalType::Gold18K750), 4564.0);
        assert_eq!(table.rate_per_gram(MetalType::Silver), 400.0);
    }

    #[test]
    fn test_reset_restores_factory_values() {
        let mut table = RateTable::factory();
        table.gold_22k_916 = 6100.0;
        table.silver_rate = 455.0;
        table.value_addition_gold = 10.0;

        table.reset();

        assert_eq!(table, RateTable::factory());
    }

    #[test]
    fn test_category_floors() {
        assert_eq!(
            MetalType::Gold22K916.category().minimum_making_charge(),
            250.0
        );
        assert_eq!(MetalType::Silver.category().minimum_making_charge(), 200.0);
    }

    #[test]
    fn test_wastage_suggestion() {
        let table = RateTable::factory();
        let suggested = table.suggested_wastage_gm(MetalType::Gold22K916, 10.0);
        assert!((suggested - 1.3).abs() < 1e-9);
        assert_eq!(table.suggested_wastage_gm(MetalType::Silver, 10.0), 0.0);
    }

    #[test]
    fn test_making_charge_defaults_by_category() {
        let table = RateTable::factory();
        assert_eq!(table.making_charge_per_gram(MetalType::Gold18K750), 80.0);
        assert_eq!(table.making_charge_per_gram(MetalType::Silver), 8.0);
    }

    #[test]
    fn test_apply_empty_fetch_leaves_table_unchanged() {
        let mut table = RateTable::factory();
        let updated = table.apply_fetched(&FetchedRates::default());
        assert!(updated.is_empty());
        assert_eq!(table, RateTable::factory());
    }

    #[test]
    fn test_apply_partial_fetch_updates_only_found_metals() {
        let mut table = RateTable::factory();
        let mut fetched = FetchedRates::default();
        fetched.insert(MetalType::Gold22K916, 5725.0);
        fetched.insert(MetalType::Silver, 412.5);

        let updated = table.apply_fetched(&fetched);

        assert_eq!(updated, vec![MetalType::Gold22K916, MetalType::Silver]);
        assert_eq!(table.gold_22k_916, 5725.0);
        assert_eq!(table.silver_rate, 412.5);
        assert_eq!(table.gold_20k_833, 5044.0);
        assert_eq!(table.gold_18k_750, 4564.0);
    }

    #[test]
    fn test_apply_discards_non_positive_rates() {
        let mut table = RateTable::factory();
        let mut fetched = FetchedRates::default();
        fetched.insert(MetalType::Gold22K916, 0.0);
        fetched.insert(MetalType::Silver, -5.0);

        let updated = table.apply_fetched(&fetched);

        assert!(updated.is_empty());
        assert_eq!(table, RateTable::factory());
    }
}
