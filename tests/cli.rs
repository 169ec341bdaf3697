use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;

fn graindata() -> Command {
    let mut cmd = Command::cargo_bin("graindata").unwrap();
    cmd.env_remove("GRAINDATA_DIR");
    cmd
}

#[test]
fn outputs_tool_name() {
    let mut cmd = graindata();
    cmd.arg("-V");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("graindata "));
}

#[test]
fn missing_archive_without_source_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");

    let mut cmd = graindata();
    cmd.current_dir(dir.path()).arg("--data-dir").arg(&data_dir);
    cmd.assert().failure().code(1);

    assert!(!data_dir.join("Grain-Data").exists());
    let created: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert!(created.iter().all(|name| name == "data"));
}

#[test]
fn downloads_and_reports_three_data_files() {
    let dir = tempfile::tempdir().unwrap();
    let remote = dir.path().join("grain.zip");
    {
        let mut writer = zip::ZipWriter::new(fs::File::create(&remote).unwrap());
        let options = zip::write::SimpleFileOptions::default();
        for name in [
            "Grain-Data/g1_x_2020-12-02T111648_corr.npz",
            "Grain-Data/g2_x_2021-10-20T111433_corr.npz",
            "Grain-Data/sub/g3_x_2021-10-21T101010_corr.npz",
        ] {
            writer.start_file(name, options).unwrap();
            writer.write_all(b"sample").unwrap();
        }
        writer.finish().unwrap();
    }
    let data_dir = dir.path().join("data");

    let mut cmd = graindata();
    cmd.current_dir(dir.path())
        .arg(format!("file://{}", remote.display()))
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--yes");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 3 .npz"));

    assert!(data_dir
        .join("Grain-Data/Grain-Data/sub/g3_x_2021-10-21T101010_corr.npz")
        .is_file());
    // --yes also accepts the archive cleanup
    assert!(!data_dir.join("Grain-Data.zip").exists());
}

#[test]
fn data_dir_is_read_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("from-env");

    let mut cmd = graindata();
    cmd.current_dir(dir.path()).env("GRAINDATA_DIR", &data_dir);
    cmd.assert().failure().code(1);

    assert!(!dir.path().join("data").exists());
}

#[test]
fn invalid_config_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("graindata.toml"), "archive_name = \"../x.zip\"").unwrap();

    let mut cmd = graindata();
    cmd.current_dir(dir.path());
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn split_rejects_invalid_year() {
    let mut cmd = Command::cargo_bin("grain-split").unwrap();
    cmd.args(["--dirs", ".", "--years", "1999"]);
    cmd.assert().failure();
}

#[test]
fn split_dry_run_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("Grain-Data");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("g1_x_2020-12-02T111648_corr.npz"), b"a").unwrap();
    fs::write(src.join("g2_x_2021-10-20T111433_corr.npz"), b"b").unwrap();

    let mut cmd = Command::cargo_bin("grain-split").unwrap();
    cmd.arg("--dirs").arg(&src).arg("--dry-run");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("matched 2/2"));

    assert!(!src.join("2020").exists());
    assert!(!src.join("2021").exists());
}

#[test]
fn split_copy_into_sibling_directories() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("Grain-Data");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("g1_x_2020-12-02T111648_corr.npz"), b"a").unwrap();
    fs::write(src.join("g2_x_2021-10-20T111433_corr.npz"), b"b").unwrap();
    fs::write(src.join("notes.txt"), b"c").unwrap();

    let mut cmd = Command::cargo_bin("grain-split").unwrap();
    cmd.arg("--dirs")
        .arg(&src)
        .args(["--out-strategy", "sibling", "--mode", "copy", "--years", "2021"]);
    cmd.assert().success();

    assert!(dir
        .path()
        .join("Grain-Data-2021/g2_x_2021-10-20T111433_corr.npz")
        .is_file());
    assert!(!dir.path().join("Grain-Data-2020").exists());
    assert!(src.join("g2_x_2021-10-20T111433_corr.npz").is_file());
}

#[test]
fn split_skips_missing_directory() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("grain-split").unwrap();
    cmd.arg("--dirs").arg(dir.path().join("absent"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Skipping non-existent directory"));
}
