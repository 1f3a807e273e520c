//! Integration tests for the recipebox binary
//!
//! Argument handling is tested without network access; the end-to-end tests
//! point the binary at a local mock API and a temporary cache directory.

use std::process::Command;

use mockito::{Matcher, Server};
use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_recipebox"))
        .args(args)
        .output()
        .expect("Failed to execute recipebox")
}

fn meals_body() -> String {
    serde_json::json!({
        "meals": [
            {
                "idMeal": "52795",
                "strMeal": "Chicken Handi",
                "strMealThumb": "https://www.themealdb.com/images/media/meals/wyxwsp1486979827.jpg",
                "strArea": "Indian",
                "strCategory": "Chicken"
            },
            {
                "idMeal": "52796",
                "strMeal": "Chicken Alfredo Primavera",
                "strMealThumb": "https://www.themealdb.com/images/media/meals/syqypv1486981727.jpg"
            }
        ]
    })
    .to_string()
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("recipebox"), "Help should mention recipebox");
    assert!(stdout.contains("search"), "Help should list the search command");
    assert!(stdout.contains("indian"), "Help should list the indian command");
}

#[test]
fn test_missing_subcommand_fails() {
    let output = run_cli(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_invalid_filter_prints_error_and_exits() {
    let output = run_cli(&["filter", "brunch"]);
    assert!(!output.status.success(), "Expected invalid filter to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid filter"),
        "Should print error message about invalid filter: {}",
        stderr
    );
    assert!(!stderr.contains("InvalidFilter("), "Should not print the Debug form: {}", stderr);
}

#[test]
fn test_invalid_log_level_prints_error_and_exits() {
    let output = run_cli(&["--log-level", "loud", "popular"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid log level"), "{}", stderr);
}

#[test]
fn test_search_is_cached_across_runs() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "chicken".into()))
        .with_body(meals_body())
        .expect(1)
        .create();
    let cache_dir = TempDir::new().expect("Failed to create temp directory");
    let base_url = server.url();
    let args = [
        "--base-url",
        base_url.as_str(),
        "--cache-dir",
        cache_dir.path().to_str().unwrap(),
        "search",
        "chicken",
    ];

    let first = run_cli(&args);
    let second = run_cli(&args);

    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    assert!(second.status.success());
    let stdout = String::from_utf8_lossy(&first.stdout);
    assert!(stdout.contains("1. Chicken Handi  (Indian • Chicken)  [id 52795]"));
    assert!(stdout.contains("2. Chicken Alfredo Primavera  (Recipe)  [id 52796]"));
    assert_eq!(first.stdout, second.stdout);
    mock.assert();
}

#[test]
fn test_server_error_exits_with_failure() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();
    let cache_dir = TempDir::new().expect("Failed to create temp directory");
    let base_url = server.url();

    let output = run_cli(&[
        "--base-url",
        base_url.as_str(),
        "--cache-dir",
        cache_dir.path().to_str().unwrap(),
        "area",
        "Thai",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("500"), "{}", stderr);
}

#[test]
fn test_explore_without_pick_lists_seafood() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("c".into(), "Seafood".into()))
        .with_body(meals_body())
        .expect(1)
        .create();
    let cache_dir = TempDir::new().expect("Failed to create temp directory");
    let base_url = server.url();

    let output = run_cli(&[
        "--base-url",
        base_url.as_str(),
        "--cache-dir",
        cache_dir.path().to_str().unwrap(),
        "explore",
    ]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1. Chicken Handi"));
    mock.assert();
}

#[test]
fn test_invalid_explore_pick_prints_error_and_exits() {
    let output = run_cli(&["explore", "lunch"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid explore pick"), "{}", stderr);
}

#[test]
fn test_show_json_output() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "52795".into()))
        .with_body(meals_body())
        .create();
    let cache_dir = TempDir::new().expect("Failed to create temp directory");
    let base_url = server.url();

    let output = run_cli(&[
        "--json",
        "--base-url",
        base_url.as_str(),
        "--cache-dir",
        cache_dir.path().to_str().unwrap(),
        "show",
        "52795",
    ]);

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be JSON");
    assert_eq!(value["idMeal"], "52795");
    assert_eq!(value["strArea"], "Indian");
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use recipebox::cli::{parse_filter_arg, Cli, Command, Query, StartupConfig};
    use recipebox::data::FilterKind;

    #[test]
    fn test_cli_show_command() {
        let cli = Cli::parse_from(["recipebox", "show", "52772"]);
        assert_eq!(cli.command, Command::Show { id: "52772".to_string() });
    }

    #[test]
    fn test_cli_indian_command() {
        let cli = Cli::parse_from(["recipebox", "indian"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.query, Query::Indian);
    }

    #[test]
    fn test_cli_explore_with_area_pick() {
        let cli = Cli::parse_from(["recipebox", "explore", "japanese"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        match config.query {
            Query::Explore(filter) => {
                assert_eq!(filter.kind, FilterKind::Area);
                assert_eq!(filter.value, "Japanese");
            }
            other => panic!("unexpected query {:?}", other),
        }
    }

    #[test]
    fn test_parse_filter_arg_indian_is_area() {
        let filter = parse_filter_arg("indian").unwrap();
        assert_eq!(filter.kind, FilterKind::Area);
        assert_eq!(filter.value, "Indian");
    }

    #[test]
    fn test_startup_config_from_cli_browse_with_query() {
        let cli = Cli::parse_from(["recipebox", "browse", "paneer"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.query, Query::Browse("paneer".to_string()));
    }
}
