use serde::{Deserialize, Serialize};

pub mod transaction {
    use super::*;

    /// A transaction record as served by the remote mock API.
    ///
    /// `date` is kept as the raw ISO-like string and `amount` as the raw JSON
    /// number; conversion to the domain type happens on the client side.
    /// Unknown fields are ignored.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Transaction {
        pub id: String,
        pub date: String,
        pub description: String,
        pub amount: f64,
    }
}
