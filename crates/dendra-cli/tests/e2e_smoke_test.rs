use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use dendra_cli::{Args, run};

/// Demos live at the workspace root, relative to the workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: Some(input.to_string_lossy().to_string()),
        output: output.to_string_lossy().to_string(),
        log_level: "off".to_string(),
        ..Args::default()
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_json_files(demos_path());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_path = temp_dir.path().join(format!(
            "{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args_for(demo_path, &output_path)) {
            Ok(()) => {
                let content = fs::read_to_string(&output_path).unwrap();
                if roxmltree::Document::parse(&content).is_err() {
                    failed_demos.push((demo_path.clone(), "output is not well-formed".to_string()));
                }
            }
            Err(e) => failed_demos.push((demo_path.clone(), e.to_string())),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_json_files(demos_path().join("errors"));

    assert!(!error_demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(!output_path.exists(), "No partial output for {}", demo_path.display());
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("✅ All {} error demos failed as expected", error_demos.len());
}

#[test]
fn e2e_host_page() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("host.svg");
    let host_dir = demos_path().join("host");

    let args = Args {
        output: output_path.to_string_lossy().to_string(),
        log_level: "off".to_string(),
        page: Some(host_dir.join("notebook.xhtml").to_string_lossy().to_string()),
        container: "container-0".to_string(),
        document_url: "http://localhost:8888/lab/tree/notebook.ipynb".to_string(),
        ..Args::default()
    };

    run(&args).expect("Host page should render");
    assert!(fs::read_to_string(&output_path).unwrap().contains("doc-01"));
}

#[test]
fn e2e_interaction_flags() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("pinned.svg");

    let args = Args {
        pin: vec!["a1".to_string()],
        hover: Some("b1".to_string()),
        scale: Some(2.0),
        recenter: true,
        overlay: true,
        ..args_for(&demos_path().join("scenario.json"), &output_path)
    };
    run(&args).expect("Interaction flags should apply");

    let content = fs::read_to_string(&output_path).unwrap();
    let doc = roxmltree::Document::parse(&content).unwrap();
    let zoom = doc
        .descendants()
        .find(|node| node.attribute("class") == Some("zoom"))
        .unwrap();
    assert!(zoom.attribute("transform").unwrap().ends_with("scale(2)"));
    assert!(content.contains("data-layer=\"overlay\""));
}

#[test]
fn e2e_unknown_pin_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("unknown.svg");

    let args = Args {
        pin: vec!["nope".to_string()],
        ..args_for(&demos_path().join("scenario.json"), &output_path)
    };
    assert!(run(&args).is_err());
    assert!(!output_path.exists());
}
