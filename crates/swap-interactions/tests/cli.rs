#![cfg(unix)]

use {
    serde_json::{Value, json},
    std::{io::Write, os::unix::fs::PermissionsExt, process::Command},
    tempfile::TempPath,
};

fn fake_router(script: &str) -> TempPath {
    let mut file = tempfile::Builder::new()
        .prefix("router")
        .tempfile()
        .unwrap();
    writeln!(file, "#!/bin/sh\n{script}").unwrap();
    file.as_file()
        .set_permissions(std::fs::Permissions::from_mode(0o755))
        .unwrap();
    file.into_temp_path()
}

// Every argument that can also be set from the environment.
const ARGUMENT_VARS: [&str; 10] = [
    "NODE_URL",
    "ROUTER_PATH",
    "ROUTER_TIMEOUT",
    "ROUTER_ADDRESS",
    "SELL_TOKEN",
    "BUY_TOKEN",
    "SELL_AMOUNT",
    "RECIPIENT",
    "LOG_FILTER",
    "USE_JSON_LOGS",
];

fn swap_interactions(router: &TempPath, extra: &[&str]) -> std::process::Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_swap-interactions"));
    for var in ARGUMENT_VARS {
        command.env_remove(var);
    }
    command
        .arg("--node-url")
        .arg("http://localhost:8545")
        .arg("--router-path")
        .arg(router.as_os_str())
        .args(extra)
        .output()
        .unwrap()
}

#[test]
fn prints_approval_then_swap() {
    let router = fake_router(
        r#"echo "Best route found"
echo "Calldata: 0x5ae401dc0000"
echo "          Value: 0"
echo "Gas estimate: 120000""#,
    );
    let output = swap_interactions(&router, &[]);
    assert!(output.status.success(), "{output:?}");

    let interactions: Value = serde_json::from_slice(&output.stdout).unwrap();
    let interactions = interactions.as_array().unwrap();
    assert_eq!(interactions.len(), 2);

    let approval = &interactions[0];
    assert_eq!(
        approval["target"].as_str().unwrap().to_lowercase(),
        "0x5fbdb2315678afecb367f032d93f642f64180aa3"
    );
    assert!(
        approval["callData"]
            .as_str()
            .unwrap()
            .starts_with("0x095ea7b3")
    );
    assert_eq!(approval["value"], json!("0"));

    let swap = &interactions[1];
    assert_eq!(
        swap["target"].as_str().unwrap().to_lowercase(),
        "0xcf7ed3acca5a467e9e704c703e8d87f634fb0fc9"
    );
    assert_eq!(swap["callData"], json!("0x5ae401dc0000"));
    assert_eq!(swap["value"], json!("0"));
}

#[test]
fn fails_without_markers() {
    let router = fake_router("echo 'no route'");
    let output = swap_interactions(&router, &[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Calldata"));
}

#[test]
fn fails_on_hanging_router() {
    let router = fake_router("exec sleep 30");
    let output = swap_interactions(&router, &["--router-timeout", "200ms"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
