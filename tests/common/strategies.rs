use proptest::prelude::*;

/// A registry operation applied during property tests
#[derive(Debug, Clone)]
pub enum RegistryOp {
    Open { name: String, create: bool },
    Close { name: String },
    Delete { name: String },
}

/// Small pool of names so sequences revisit the same stores
pub fn store_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("scores".to_string()),
        Just("Scores".to_string()),
        Just("settings".to_string()),
        Just("cache".to_string()),
        "[a-z]{1,3}",
    ]
}

pub fn registry_op_strategy() -> impl Strategy<Value = RegistryOp> {
    prop_oneof![
        (store_name_strategy(), any::<bool>())
            .prop_map(|(name, create)| RegistryOp::Open { name, create }),
        store_name_strategy().prop_map(|name| RegistryOp::Close { name }),
        store_name_strategy().prop_map(|name| RegistryOp::Delete { name }),
    ]
}

pub fn registry_ops_strategy() -> impl Strategy<Value = Vec<RegistryOp>> {
    prop::collection::vec(registry_op_strategy(), 0..60)
}
