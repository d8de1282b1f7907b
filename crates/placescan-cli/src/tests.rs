use super::*;

const BASE: [&str; 7] = [
    "placescan",
    "--lat",
    "51.0341",
    "--lng",
    "7.8578",
    "--queries",
    "coach,Arzt,Trainer",
];

#[test]
fn parses_required_arguments_with_defaults() {
    let cli = Cli::try_parse_from(BASE).expect("expected valid cli args");

    assert!((cli.lat - 51.0341).abs() < f64::EPSILON);
    assert!((cli.lng - 7.8578).abs() < f64::EPSILON);
    assert_eq!(cli.queries, "coach,Arzt,Trainer");
    assert_eq!(cli.radius, 35_000);
    assert_eq!(cli.output, PathBuf::from("results.xlsx"));
    assert!(!cli.website);
    assert!(cli.page_delay_ms.is_none());
    assert!(cli.max_pages.is_none());
}

#[test]
fn parses_api_key_with_underscore_flag() {
    let mut args = BASE.to_vec();
    args.extend(["--api_key", "abc123"]);
    let cli = Cli::try_parse_from(args).expect("expected valid cli args");
    assert_eq!(cli.api_key.as_deref(), Some("abc123"));
}

#[test]
fn parses_optional_flags() {
    let mut args = BASE.to_vec();
    args.extend([
        "--radius",
        "5000",
        "--output",
        "out/koeln.xlsx",
        "--website",
        "--page-delay-ms",
        "500",
        "--max-pages",
        "2",
    ]);
    let cli = Cli::try_parse_from(args).expect("expected valid cli args");

    assert_eq!(cli.radius, 5000);
    assert_eq!(cli.output, PathBuf::from("out/koeln.xlsx"));
    assert!(cli.website);
    assert_eq!(cli.page_delay_ms, Some(500));
    assert_eq!(cli.max_pages, Some(2));
}

#[test]
fn accepts_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "placescan",
        "--lat",
        "-33.8688",
        "--lng",
        "-151.2093",
        "--queries",
        "cafe",
    ])
    .expect("expected valid cli args");
    assert!(cli.lat < 0.0);
    assert!(cli.lng < 0.0);
}

#[test]
fn missing_queries_is_rejected() {
    let result = Cli::try_parse_from(["placescan", "--lat", "51", "--lng", "7"]);
    assert!(result.is_err());
}

#[test]
fn zero_max_pages_is_rejected() {
    let mut args = BASE.to_vec();
    args.extend(["--max-pages", "0"]);
    assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn non_numeric_radius_is_rejected() {
    let mut args = BASE.to_vec();
    args.extend(["--radius", "far"]);
    assert!(Cli::try_parse_from(args).is_err());
}
