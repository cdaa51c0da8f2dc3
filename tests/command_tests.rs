use holder_overlap::aggregator::HolderSet;
use holder_overlap::commands::{
    collect_contracts, execute_contracts, execute_export, run_analysis, validate_args,
    AnalyzeArgs, ContractsArgs, ExportArgs,
};
use holder_overlap::contracts::{read_contract_list, ContractEntry};
use holder_overlap::lookup::{fetch_all_holders, fetch_all_metadata, ContractMetadata, HolderSource};
use holder_overlap::output::{read_report, HolderSelection};
use holder_overlap::utils::error::LookupError;
use std::collections::HashMap;

const ADDR_A: &str = "0x1111111111111111111111111111111111111111";
const ADDR_B: &str = "0x2222222222222222222222222222222222222222";
const ADDR_C: &str = "0x3333333333333333333333333333333333333333";

/// In-memory lookup; unknown contracts fail like a network error would
struct StubSource {
    holders: HashMap<String, HolderSet>,
}

impl StubSource {
    fn new(entries: &[(&str, &[&str])]) -> Self {
        let holders = entries
            .iter()
            .map(|(address, holders)| {
                (
                    address.to_string(),
                    holders.iter().map(|h| h.to_string()).collect(),
                )
            })
            .collect();
        Self { holders }
    }
}

impl HolderSource for StubSource {
    fn holders_for(&self, contract: &str) -> Result<HolderSet, LookupError> {
        self.holders
            .get(contract)
            .cloned()
            .ok_or_else(|| LookupError::InvalidResponse("HTTP 500".to_string()))
    }

    fn metadata_for(&self, contract: &str) -> Result<ContractMetadata, LookupError> {
        if self.holders.contains_key(contract) {
            Ok(ContractMetadata {
                name: Some(format!("Collection {}", &contract[2..6])),
                ..Default::default()
            })
        } else {
            Err(LookupError::Rpc {
                code: -32602,
                message: "invalid address".to_string(),
            })
        }
    }
}

fn contracts() -> Vec<ContractEntry> {
    vec![
        ContractEntry::new(ADDR_A, "A"),
        ContractEntry::new(ADDR_B, "B"),
        ContractEntry::new(ADDR_C, "C"),
    ]
}

#[test]
fn test_failed_lookup_degrades_to_empty_set() {
    let source = StubSource::new(&[(ADDR_A, &["h1"]), (ADDR_C, &["h1", "h2"])]);

    let map = fetch_all_holders(&source, &contracts());

    assert_eq!(map.len(), 3);
    assert_eq!(map.addresses().collect::<Vec<_>>(), vec![ADDR_A, ADDR_B, ADDR_C]);
    assert!(map.get(ADDR_B).unwrap().is_empty());
    assert_eq!(map.get(ADDR_C).unwrap().len(), 2);
}

#[test]
fn test_failed_metadata_becomes_none() {
    let source = StubSource::new(&[(ADDR_A, &["h1"])]);

    let metadata = fetch_all_metadata(&source, &contracts());

    assert_eq!(metadata.len(), 3);
    assert_eq!(metadata[0].as_ref().unwrap().name.as_deref(), Some("Collection 1111"));
    assert!(metadata[1].is_none());
}

#[test]
fn test_run_analysis_writes_report() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("report.json");
    let source = StubSource::new(&[
        (ADDR_A, &["h1", "h2", "h3"]),
        (ADDR_B, &["h1", "h2"]),
        (ADDR_C, &["h1"]),
    ]);

    let args = AnalyzeArgs {
        api_key: "key".to_string(),
        contracts: contracts(),
        output_json: output.clone(),
        fetch_metadata: true,
        ..Default::default()
    };
    validate_args(&args).unwrap();

    let report = run_analysis(&source, &args).unwrap();
    let loaded = read_report(&output).unwrap();

    assert_eq!(loaded, report);
    assert_eq!(report.results.token_holding_counts[&3], 1);
    assert_eq!(report.results.token_holding_counts[&2], 1);
    assert_eq!(report.results.token_holding_counts[&1], 1);
    assert_eq!(report.results.link_data.len(), 3);
    assert!(report.contracts.iter().all(|c| c.metadata.is_some()));
}

#[test]
fn test_run_analysis_with_failed_contract() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = StubSource::new(&[(ADDR_A, &["h1"]), (ADDR_C, &["h1"])]);

    let args = AnalyzeArgs {
        api_key: "key".to_string(),
        contracts: contracts(),
        output_json: temp_dir.path().join("report.json"),
        ..Default::default()
    };

    let report = run_analysis(&source, &args).unwrap();

    assert_eq!(report.contracts[1].holder_count, 0);
    assert_eq!(report.results.token_holding_counts[&2], 1);
    assert!(report.contracts.iter().all(|c| c.metadata.is_none()));
}

#[test]
fn test_export_command() {
    let temp_dir = tempfile::tempdir().unwrap();
    let report_path = temp_dir.path().join("report.json");
    let source = StubSource::new(&[(ADDR_A, &["h1", "h2"]), (ADDR_B, &["h2", "h3"])]);

    let args = AnalyzeArgs {
        api_key: "key".to_string(),
        contracts: contracts()[..2].to_vec(),
        output_json: report_path.clone(),
        ..Default::default()
    };
    run_analysis(&source, &args).unwrap();

    let holders_path = temp_dir.path().join("holders.txt");
    let exported = execute_export(ExportArgs {
        report: report_path.clone(),
        selection: HolderSelection::TokenCount(1),
        output: Some(holders_path.clone()),
    })
    .unwrap();

    assert_eq!(exported, 2);
    assert_eq!(std::fs::read_to_string(&holders_path).unwrap(), "h1\nh3\n");

    let empty = execute_export(ExportArgs {
        report: report_path,
        selection: HolderSelection::TokenCount(5),
        output: Some(temp_dir.path().join("none.txt")),
    });
    assert!(empty.is_err());
}

#[test]
fn test_collect_contracts_merges_sources() {
    let temp_dir = tempfile::tempdir().unwrap();
    let csv_path = temp_dir.path().join("nodes.csv");
    let csv = format!("address,tag\n{},A\n", ADDR_A.to_uppercase());
    std::fs::write(&csv_path, csv).unwrap();

    let share = format!("{},B", ADDR_B);

    let contracts = collect_contracts(
        Some(csv_path.as_path()),
        Some(share.as_str()),
        &[ContractEntry::new(&ADDR_C[2..], "C")],
    )
    .unwrap();

    assert_eq!(
        contracts,
        vec![
            ContractEntry::new(ADDR_A, "A"),
            ContractEntry::new(ADDR_B, "B"),
            ContractEntry::new(ADDR_C, "C"),
        ]
    );
}

#[test]
fn test_contracts_command_writes_csv() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("nodes.csv");

    let share = execute_contracts(ContractsArgs {
        contracts: contracts(),
        output: Some(output.clone()),
    })
    .unwrap();

    assert_eq!(share, format!("{},A;{},B;{},C", ADDR_A, ADDR_B, ADDR_C));
    assert_eq!(read_contract_list(&output).unwrap(), contracts());
}

#[test]
fn test_contracts_command_rejects_empty_list() {
    let result = execute_contracts(ContractsArgs {
        contracts: Vec::new(),
        output: None,
    });
    assert!(result.is_err());
}
