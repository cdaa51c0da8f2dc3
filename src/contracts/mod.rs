//! Contract lists: the `{address, tag}` entries a run analyzes.
//!
//! Lists come from a CSV file, from the compact `addr,tag;addr,tag`
//! share string, or from repeated CLI flags.

pub mod list;

pub use list::{
    normalize_address, normalize_entries, parse_contract_csv, parse_share_string,
    read_contract_list, to_share_string, validate_address, write_contract_list, ContractEntry,
};
