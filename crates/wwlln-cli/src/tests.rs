use super::*;

#[test]
fn parses_dump_command() {
    let cli = Cli::try_parse_from(["wwlln-cli", "dump"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Dump));
}

#[test]
fn parses_nearest_with_negative_coordinates() {
    let cli = Cli::try_parse_from(["wwlln-cli", "nearest", "--lat", "-33.9", "--lon", "-70.6"])
        .expect("expected valid cli args");

    match cli.command {
        Commands::Nearest { lat, lon } => {
            assert!((lat + 33.9).abs() < f64::EPSILON);
            assert!((lon + 70.6).abs() < f64::EPSILON);
        }
        other => panic!("expected Nearest, got {other:?}"),
    }
}

#[test]
fn within_defaults_to_metric_without_window() {
    let cli = Cli::try_parse_from([
        "wwlln-cli", "within", "--lat", "56.16", "--lon", "92.23", "--radius", "50",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Within {
            unit, window_secs, ..
        } => {
            assert_eq!(unit, "metric");
            assert_eq!(window_secs, None);
        }
        other => panic!("expected Within, got {other:?}"),
    }
}

#[test]
fn within_accepts_unit_and_window() {
    let cli = Cli::try_parse_from([
        "wwlln-cli",
        "within",
        "--lat",
        "56.16",
        "--lon",
        "92.23",
        "--radius",
        "80",
        "--unit",
        "imperial",
        "--window-secs",
        "3600",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Within { ref unit, window_secs: Some(3600), .. } if unit == "imperial"
    ));
}

#[test]
fn within_requires_radius() {
    let result = Cli::try_parse_from(["wwlln-cli", "within", "--lat", "1", "--lon", "2"]);
    assert!(result.is_err());
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["wwlln-cli"]).is_err());
}
