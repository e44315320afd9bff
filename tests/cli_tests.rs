//! CLI integration tests.

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn suidex() -> Command {
    let mut cmd = cargo_bin_cmd!("suidex");
    for network in ["LOCALNET", "TESTNET", "MAINNET"] {
        for suffix in ["PACKAGE_ID", "POOL_OBJECT_ID", "ACCOUNT_CAP", "ADDRESS"] {
            cmd.env_remove(format!("{network}_{suffix}"));
        }
    }
    cmd.env_remove("SUIDEX_NETWORK");
    cmd
}

#[test]
fn help_lists_commands() {
    suidex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("ids"))
        .stdout(predicate::str::contains("account-cap"));
}

#[test]
fn ids_prints_client_ids_and_codes() {
    suidex()
        .args(["ids", "-n", "3", "--prefix", "TEST"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Client Order Id"))
        .stdout(predicate::str::contains("1000000"))
        .stdout(predicate::str::contains("TEST"));
}

#[test]
fn config_reads_network_keys_from_environment() {
    suidex()
        .arg("config")
        .env("SUIDEX_NETWORK", "testnet")
        .env("TESTNET_PACKAGE_ID", "0xPKG")
        .env("TESTNET_POOL_OBJECT_ID", "0xPOOL")
        .assert()
        .success()
        .stdout(predicate::str::contains("testnet"))
        .stdout(predicate::str::contains("0xPOOL"))
        .stdout(predicate::str::contains("SUI-REALUSDC"))
        .stdout(predicate::str::contains("Configuration valid"));
}

#[test]
fn config_reads_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "network = \"mainnet\"\n\n[deepbook]\npackage_id = \"0xFILEPKG\"\npool_object_id = \"0xFILEPOOL\""
    )
    .expect("write config");

    suidex()
        .arg("config")
        .arg("--config")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0xFILEPKG"))
        .stdout(predicate::str::contains("https://fullnode.mainnet.sui.io:443"));
}

#[test]
fn missing_package_id_exits_nonzero_and_names_key() {
    suidex()
        .arg("config")
        .env("SUIDEX_NETWORK", "testnet")
        .env("TESTNET_POOL_OBJECT_ID", "0xPOOL")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TESTNET_PACKAGE_ID"));
}

#[test]
fn account_cap_requires_an_address() {
    suidex()
        .arg("account-cap")
        .env("SUIDEX_NETWORK", "localnet")
        .env("LOCALNET_PACKAGE_ID", "0xPKG")
        .env("LOCALNET_POOL_OBJECT_ID", "0xPOOL")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LOCALNET_ADDRESS"));
}

#[test]
fn account_cap_asks_the_chain_even_when_one_is_configured() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "network = \"localnet\"\n\n[rpc]\nurl = \"http://127.0.0.1:9\"\ntimeout_ms = 2000\n\n[deepbook]\npackage_id = \"0xPKG\"\npool_object_id = \"0xPOOL\"\naccount_cap = \"0xSTALE\""
    )
    .expect("write config");

    suidex()
        .arg("account-cap")
        .arg("--config")
        .arg(file.path())
        .env("LOCALNET_ADDRESS", "0x1")
        .assert()
        .failure()
        .stdout(predicate::str::contains("0xSTALE").not());
}
