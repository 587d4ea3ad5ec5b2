use {
    alloy::primitives::Address,
    model::{
        order::OrderData,
        signature::{EcdsaSignature, SigningScheme},
        typed_data::TypedDataDocument,
    },
    serde_json::{Value, json},
    std::process::{Command, Output},
};

const KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
const OWNER: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

fn order_signer(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_order-signer"))
        .args(args)
        .env_remove("CHAIN_ID")
        .env_remove("SETTLEMENT")
        .env_remove("SIGNING_SCHEME")
        .env_remove("LOG_FILTER")
        .env_remove("USE_JSON_LOGS")
        .output()
        .unwrap()
}

fn order() -> Value {
    json!({
        "sellToken": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        "buyToken": "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
        "receiver": null,
        "sellAmount": "1000000000000000000",
        "buyAmount": "1",
        "validTo": 4000000000u32,
        "appData": "0x0000000000000000000000000000000000000000000000000000000000000000",
        "feeAmount": "null",
        "kind": "sell",
        "partiallyFillable": false,
        "sellTokenBalance": "erc20",
        "buyTokenBalance": "erc20",
        "settlement": "0x9008D19f58AAbD9eD0D60971565AA8510560ab41",
        "chainId": "1",
    })
}

#[test]
fn prints_signed_payload() {
    let output = order_signer(&[KEY, &order().to_string()]);
    assert!(output.status.success(), "{output:?}");

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["sellAmount"], json!("1000000000000000000"));
    assert_eq!(value["feeAmount"], json!("0"));
    assert_eq!(value["validTo"], json!(4000000000u32));
    assert_eq!(value["signingScheme"], json!("eip712"));
    assert_eq!(value["from"], json!(OWNER));
    assert!(value.get("chainId").is_none());
    assert!(value.get("settlement").is_none());
    let signature = value["signature"].as_str().unwrap();
    assert_eq!(signature.len(), 132);
    assert!(signature.starts_with("0x"));

    let signature: EcdsaSignature = serde_json::from_value(value["signature"].clone()).unwrap();
    let order: OrderData = serde_json::from_value(value).unwrap();
    let settlement: Address = "0x9008D19f58AAbD9eD0D60971565AA8510560ab41".parse().unwrap();
    let document = TypedDataDocument::new(1, settlement, order);
    let owner = signature
        .recover(
            SigningScheme::Eip712,
            &document.domain_separator(),
            &document.struct_hash(),
        )
        .unwrap();
    assert_eq!(owner, OWNER.parse::<Address>().unwrap());
}

#[test]
fn signs_amounts_above_u64() {
    let order = order()
        .to_string()
        .replace(r#""1000000000000000000""#, "5000000000000000000000");
    let output = order_signer(&[KEY, &order]);
    assert!(output.status.success(), "{output:?}");

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["sellAmount"], json!("5000000000000000000000"));
}

#[test]
fn fails_on_missing_required_field() {
    let mut order = order();
    order["buyAmount"] = json!(null);
    let output = order_signer(&[KEY, &order.to_string()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("buyAmount"));
}

#[test]
fn fails_on_wrong_argument_count() {
    let output = order_signer(&[KEY]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
