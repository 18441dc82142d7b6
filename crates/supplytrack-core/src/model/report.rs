use serde::{Deserialize, Serialize};

/// One bar of a deviation chart: a part and its deviation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDeviation {
    pub part_name: String,
    pub deviation: f64,
}

/// Deviation figures of all parts grouped under one order name
///
/// Orders sharing a name land in the same group. Orders without parts never
/// produce a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDeviation {
    pub order_name: String,
    pub parts: Vec<PartDeviation>,
}

impl OrderDeviation {
    /// Largest deviation in the group, 0.0 for an empty group
    pub fn max_deviation(&self) -> f64 {
        self.parts
            .iter()
            .map(|p| p.deviation)
            .fold(0.0_f64, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_deviation() {
        let group = OrderDeviation {
            order_name: "O1".to_string(),
            parts: vec![
                PartDeviation {
                    part_name: "P1".to_string(),
                    deviation: 0.5,
                },
                PartDeviation {
                    part_name: "P2".to_string(),
                    deviation: 1.25,
                },
            ],
        };
        assert_eq!(group.max_deviation(), 1.25);
    }
}
