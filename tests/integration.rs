use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(project: &Path, cache: &Path) -> Command {
    let mut cmd = Command::cargo_bin("asset-sweep").unwrap();
    cmd.env("XDG_CACHE_HOME", cache).arg(project);
    cmd
}

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn scan_json(project: &Path) -> serde_json::Value {
    let cache = TempDir::new().unwrap();
    let output = cmd(project, cache.path())
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

fn asset<'a>(json: &'a serde_json::Value, rel: &str) -> &'a serde_json::Value {
    json["assets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["relative_path"] == rel)
        .unwrap_or_else(|| panic!("asset {rel} not in result"))
}

mod scenarios {
    use super::*;

    #[test]
    fn test_static_import_in_react_project_is_used() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "package.json",
            r#"{"dependencies": {"react": "^18.0.0"}}"#,
        );
        write(dir.path(), "src/assets/logo.png", "png-bytes");
        write(
            dir.path(),
            "src/App.tsx",
            "import logo from \"./src/assets/logo.png\";\n",
        );

        let json = scan_json(dir.path());
        assert_eq!(json["project_type"], "react");

        let logo = asset(&json, "src/assets/logo.png");
        assert_eq!(logo["status"], "used");
        assert_eq!(logo["reference_count"], 1);

        let reference = &logo["references"][0];
        assert_eq!(reference["kind"], "import");
        assert_eq!(reference["line"], 1);
        assert_eq!(reference["confidence"], 1.0);
        assert_eq!(reference["in_comment"], false);
        assert_eq!(reference["dynamic"], false);
    }

    #[test]
    fn test_comment_only_reference_is_potentially_unused() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "img/banner.png", "x");
        write(dir.path(), "src/app.js", "// old: ./img/banner.png\n");

        let json = scan_json(dir.path());
        let banner = asset(&json, "img/banner.png");
        assert_eq!(banner["status"], "potentially_unused");
        assert_eq!(banner["reference_count"], 1);
        assert_eq!(banner["references"][0]["in_comment"], true);
    }

    #[test]
    fn test_dynamic_template_literal_needs_review() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "public/hero.png", "x");
        write(dir.path(), "src/app.js", "const u = `${base}/hero.png`;\n");

        let json = scan_json(dir.path());
        let hero = asset(&json, "public/hero.png");
        assert_eq!(hero["status"], "needs_manual_review");
        assert_eq!(hero["references"][0]["dynamic"], true);
    }

    #[test]
    fn test_unused_asset_counts_reclaimable_bytes() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "assets/old-logo.svg", "0123456789");

        let json = scan_json(dir.path());
        assert_eq!(asset(&json, "assets/old-logo.svg")["status"], "unused");
        assert_eq!(json["stats"]["unused_size_bytes"], 10);
        assert_eq!(json["stats"]["unused_count"], 1);
    }

    #[test]
    fn test_exclusion_is_honoured_for_sources_and_assets() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "assets/used-elsewhere.png", "x");
        write(dir.path(), "legacy/dropped.png", "x");
        write(
            dir.path(),
            "legacy/app.js",
            "import x from \"./assets/used-elsewhere.png\";\n",
        );

        let cache = TempDir::new().unwrap();
        let output = cmd(dir.path(), cache.path())
            .arg("--exclude")
            .arg("legacy/**")
            .arg("--format")
            .arg("json")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

        // The excluded asset never appears; the only reference to the kept
        // asset came from inside legacy/, so it is unused.
        assert!(json["assets"]
            .as_array()
            .unwrap()
            .iter()
            .all(|a| a["relative_path"] != "legacy/dropped.png"));
        assert_eq!(asset(&json, "assets/used-elsewhere.png")["status"], "unused");
    }

    #[test]
    fn test_angular_component_head_wins() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "package.json",
            r#"{"dependencies": {"@angular/core": "^17.0.0"}}"#,
        );
        write(
            dir.path(),
            "src/app/app.component.ts",
            "@Component({ templateUrl: './x.html', styleUrls: ['./x.css'] })\n",
        );
        write(dir.path(), "src/assets/icon.png", "x");

        let json = scan_json(dir.path());
        assert_eq!(json["project_type"], "angular");
        // Both decorator references are harvested at full confidence even
        // though neither names an asset-extension file.
        assert_eq!(json["stats"]["references_found"], 2);
    }

    #[test]
    fn test_basename_homonyms_both_record_the_reference() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "assets/a/logo.png", "x");
        write(dir.path(), "assets/b/logo.png", "x");
        write(dir.path(), "src/app.js", "const l = \"wrong/logo.png\";\n");

        let json = scan_json(dir.path());
        assert_eq!(asset(&json, "assets/a/logo.png")["reference_count"], 1);
        assert_eq!(asset(&json, "assets/b/logo.png")["reference_count"], 1);
    }
}

mod boundaries {
    use super::*;

    #[test]
    fn test_empty_project() {
        let dir = TempDir::new().unwrap();
        let json = scan_json(dir.path());
        assert_eq!(json["stats"]["total_assets"], 0);
        assert_eq!(json["stats"]["references_found"], 0);
        assert_eq!(json["aborted"], false);
    }

    #[test]
    fn test_assets_without_sources_are_all_unused() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "assets/a.png", "x");
        write(dir.path(), "assets/b.woff2", "x");

        let json = scan_json(dir.path());
        assert!(json["assets"]
            .as_array()
            .unwrap()
            .iter()
            .all(|a| a["status"] == "unused"));
    }

    #[test]
    fn test_missing_root_exits_not_found() {
        let cache = TempDir::new().unwrap();
        Command::cargo_bin("asset-sweep")
            .unwrap()
            .env("XDG_CACHE_HOME", cache.path())
            .arg("/definitely/not/a/project")
            .assert()
            .failure()
            .code(3)
            .stderr(predicate::str::contains("not-found"));
    }

    #[test]
    fn test_invalid_exclude_glob_exits_invalid_argument() {
        let dir = TempDir::new().unwrap();
        let cache = TempDir::new().unwrap();
        cmd(dir.path(), cache.path())
            .arg("--exclude")
            .arg("bad[")
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("invalid-argument"));
    }
}

mod cli_options {
    use super::*;

    #[test]
    fn test_text_output_summarises() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "assets/a.png", "x");

        let cache = TempDir::new().unwrap();
        cmd(dir.path(), cache.path())
            .arg("--no-color")
            .assert()
            .success()
            .stdout(predicate::str::contains("Reclaimable"))
            .stdout(predicate::str::contains("assets/a.png"));
    }

    #[test]
    fn test_csv_output() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "assets/a.png", "x");

        let cache = TempDir::new().unwrap();
        cmd(dir.path(), cache.path())
            .arg("--format")
            .arg("csv")
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "Status,Path,Size,Category,References,ModTime",
            ));
    }

    #[test]
    fn test_output_to_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "assets/a.png", "x");

        let cache = TempDir::new().unwrap();
        let out_file = dir.path().join("report.json");
        cmd(dir.path(), cache.path())
            .arg("--format")
            .arg("json")
            .arg("--output")
            .arg(&out_file)
            .assert()
            .success();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out_file).unwrap()).unwrap();
        assert_eq!(json["stats"]["total_assets"], 1);
    }

    #[test]
    fn test_results_cached_for_review() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "assets/a.png", "x");

        let cache = TempDir::new().unwrap();
        cmd(dir.path(), cache.path())
            .arg("--format")
            .arg("json")
            .assert()
            .success()
            .stderr(predicate::str::contains("saved to"));

        let saved: Vec<_> = walkdir::WalkDir::new(cache.path())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() == "scan-results.json")
            .collect();
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn test_framework_override_flag() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "assets/a.png", "x");

        let cache = TempDir::new().unwrap();
        let output = cmd(dir.path(), cache.path())
            .arg("--framework")
            .arg("flutter")
            .arg("--format")
            .arg("json")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["project_type"], "flutter");
    }

    #[test]
    fn test_config_file_extensions_respected() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".asset-sweep.yaml", "extensions:\n  - .png\n");
        write(dir.path(), "assets/a.png", "x");
        write(dir.path(), "assets/b.svg", "x");

        let json = scan_json(dir.path());
        assert_eq!(json["stats"]["total_assets"], 1);
    }
}
