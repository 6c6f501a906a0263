use super::*;

#[test]
fn parses_suppliers_command() {
    let cli = Cli::try_parse_from(["supplyscan", "suppliers"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Suppliers));
    assert!(cli.suppliers.is_none());
}

#[test]
fn parses_products_for_one_supplier() {
    let cli = Cli::try_parse_from(["supplyscan", "products", "--supplier", "screwfix"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Products {
            supplier: Some(ref s),
            category: None,
            all: false,
        } if s == "screwfix"
    ));
}

#[test]
fn parses_products_with_category_filter() {
    let cli = Cli::try_parse_from([
        "supplyscan",
        "products",
        "--supplier",
        "toolstation",
        "--category",
        "cable",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Products {
            category: Some(ref c),
            ..
        } if c == "cable"
    ));
}

#[test]
fn parses_products_all() {
    let cli = Cli::try_parse_from(["supplyscan", "products", "--all"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Products {
            supplier: None,
            all: true,
            ..
        }
    ));
}

#[test]
fn products_requires_supplier_or_all() {
    assert!(Cli::try_parse_from(["supplyscan", "products"]).is_err());
}

#[test]
fn products_rejects_supplier_with_all() {
    assert!(
        Cli::try_parse_from(["supplyscan", "products", "--all", "--supplier", "screwfix"]).is_err()
    );
}

#[test]
fn category_requires_supplier() {
    assert!(
        Cli::try_parse_from(["supplyscan", "products", "--all", "--category", "cable"]).is_err()
    );
}

#[test]
fn parses_deals_and_coupons() {
    let deals = Cli::try_parse_from(["supplyscan", "deals", "--supplier", "screwfix"]).unwrap();
    assert!(matches!(deals.command, Commands::Deals { ref supplier } if supplier == "screwfix"));

    let coupons =
        Cli::try_parse_from(["supplyscan", "coupons", "--supplier", "toolstation"]).unwrap();
    assert!(matches!(coupons.command, Commands::Coupons { ref supplier } if supplier == "toolstation"));
}

#[test]
fn suppliers_path_override_is_global() {
    let cli = Cli::try_parse_from([
        "supplyscan",
        "deals",
        "--supplier",
        "screwfix",
        "--suppliers",
        "/tmp/suppliers.yaml",
    ])
    .unwrap();
    assert_eq!(cli.suppliers, Some(PathBuf::from("/tmp/suppliers.yaml")));
}

#[test]
fn deals_requires_supplier() {
    assert!(Cli::try_parse_from(["supplyscan", "deals"]).is_err());
}
