//! End-to-end loading from files on disk

use anyhow::Result;
use approx::assert_abs_diff_eq;
use edufert_core::{CountryCode, Selection};
use edufert_io::{
    export_to_path, load_and_join, load_and_join_with, read_export, ExportConfig, LoaderConfig,
    PipelineConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ENROLLMENT: &str = "\
Country Name,Country Code,2015,2016,2017
Chinaland,CHN,90.1,91.0,92.5
Atlantis,ATL,40.0,,44.0
Lemuria,LEM,70.0,71.0,72.0
";

const FERTILITY: &str = "\
Country Name,Country Code,2015,2016
China Land,CHN,1.6,1.5
Atlantis,ATL,4.1,4.0
Mu,MUU,3.3,3.2
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn fixture() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let enrollment = write(&dir, "enrollment.csv", ENROLLMENT);
    let fertility = write(&dir, "fertility.csv", FERTILITY);
    (dir, enrollment, fertility)
}

#[test]
fn test_load_and_join_from_files() -> Result<()> {
    let (_dir, enrollment, fertility) = fixture();
    let dataset = load_and_join(&enrollment, &fertility)?;

    // CHN and ATL for 2015 and 2016; 2017, LEM and MUU are one-sided
    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.years().collect::<Vec<_>>(), vec![2015, 2016]);
    assert_eq!(
        dataset.codes().map(CountryCode::as_str).collect::<Vec<_>>(),
        vec!["ATL", "CHN"]
    );
    assert_eq!(dataset.labels("CHN").unwrap().fertility, "China Land");

    // ATL 2016 has no enrollment value, so it is dropped by filtering
    let filtered = dataset.filter(&Selection::all());
    assert_eq!(filtered.len(), 3);
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let (dir, enrollment, _) = fixture();
    let err = load_and_join(&enrollment, dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, edufert_io::Error::Io(_)));
    assert!(!err.is_malformed_input());
}

#[test]
fn test_malformed_table_aborts_load() {
    let (dir, enrollment, _) = fixture();
    let fertility = write(
        &dir,
        "bad.csv",
        "Country Name,Country Code,2015,Twenty16\nChina Land,CHN,1.6,1.5\n",
    );
    let err = load_and_join(&enrollment, &fertility).unwrap_err();
    assert!(err.is_malformed_input());
}

#[test]
fn test_duplicate_code_aborts_load() {
    let (dir, enrollment, _) = fixture();
    let fertility = write(
        &dir,
        "dup.csv",
        "Country Name,Country Code,2015\nChina Land,CHN,1.6\nChina Land,CHN,1.7\n",
    );
    assert!(load_and_join(&enrollment, &fertility)
        .unwrap_err()
        .is_malformed_input());
}

#[test]
fn test_pipeline_config_file() -> Result<()> {
    let dir = TempDir::new()?;
    let enrollment = write(&dir, "edu.csv", &ENROLLMENT.replace(',', ";"));
    let fertility = write(
        &dir,
        "fert.csv",
        "Country Name,Country Code,Indicator Code,2015\nChina Land,CHN,SP.DYN.TFRT.IN,1.6\n",
    );
    let config_path = write(
        &dir,
        "config.json",
        &format!(
            r#"{{
                "enrollment_path": {:?},
                "fertility_path": {:?},
                "enrollment": {{ "delimiter": ";" }},
                "fertility": {{ "ignored_columns": ["Indicator Code"] }}
            }}"#,
            enrollment, fertility
        ),
    );

    let config = PipelineConfig::from_json_file(&config_path)?;
    assert_eq!(config.enrollment.delimiter, ';');
    let dataset = load_and_join_with(&config)?;
    assert_eq!(dataset.len(), 1);
    assert_abs_diff_eq!(
        dataset.records()[0].enrollment_rate.unwrap(),
        90.1,
        epsilon = 1e-12
    );
    Ok(())
}

#[test]
fn test_export_round_trip_through_file() -> Result<()> {
    let (dir, enrollment, fertility) = fixture();
    let dataset = load_and_join(&enrollment, &fertility)?;
    let filtered = dataset.filter(&Selection::all().with_year_range(2015..=2016));

    let out = dir.path().join("filtered.csv");
    let config = ExportConfig::default();
    export_to_path(filtered.records(), &out, &config)?;

    let back = read_export(fs::File::open(&out)?, &config)?;
    assert_eq!(back.records(), filtered.records());
    Ok(())
}

#[test]
fn test_export_uses_input_delimiter() -> Result<()> {
    let dir = TempDir::new()?;
    let enrollment = write(&dir, "edu.csv", &ENROLLMENT.replace(',', ";"));
    let fertility = write(&dir, "fert.csv", &FERTILITY.replace(',', ";"));
    let config = PipelineConfig::from_json_str(&format!(
        r#"{{
            "enrollment_path": {:?},
            "fertility_path": {:?},
            "enrollment": {{ "delimiter": ";" }},
            "fertility": {{ "delimiter": ";" }}
        }}"#,
        enrollment, fertility
    ))?;
    let dataset = load_and_join_with(&config)?;

    let out = dir.path().join("filtered.csv");
    let export = config.export_config();
    export_to_path(dataset.records(), &out, &export)?;

    let text = fs::read_to_string(&out)?;
    assert!(text.starts_with("Country Name_edu;Country Code;Year;"));
    let back = read_export(text.as_bytes(), &export)?;
    assert_eq!(back.records(), dataset.records());
    Ok(())
}

#[test]
fn test_custom_identifier_columns() -> Result<()> {
    let dir = TempDir::new()?;
    let enrollment = write(&dir, "e.csv", "name,iso3,2015\nChinaland,CHN,90.1\n");
    let fertility = write(&dir, "f.csv", "name,iso3,2015\nChinaland,CHN,1.6\n");

    let loader = |base: LoaderConfig| base.with_name_column("name").with_code_column("iso3");
    let config = PipelineConfig {
        enrollment: loader(LoaderConfig::enrollment()),
        fertility: loader(LoaderConfig::fertility()),
        ..PipelineConfig::new(&enrollment, &fertility)
    };
    let dataset = load_and_join_with(&config)?;
    assert_eq!(dataset.len(), 1);
    assert!(Path::new(&config.enrollment_path).exists());
    Ok(())
}
