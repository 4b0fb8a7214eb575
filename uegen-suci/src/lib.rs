//! SUPI concealment and UE profile generation
//!
//! [`SuciEncoder`] turns an `imsi-...` SUPI into a SUCI string using the
//! ECIES protection schemes from `uegen-crypto`. [`Operator`] builds
//! complete UE subscriber profiles around it and [`export`] writes them
//! out as YAML.

pub mod error;
pub mod export;
pub mod operator;
pub mod suci;

pub use error::SuciError;
pub use export::{export_profiles, export_yaml};
pub use operator::{Operator, UeProfile};
pub use suci::{conceal_identifier, null_scheme_suci, Suci, SuciEncoder};

#[cfg(any(test, feature = "test-vectors"))]
pub use suci::conceal_identifier_with_ephemeral;
