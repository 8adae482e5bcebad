use std::{fs, path::PathBuf, process::Command};

#[test]
fn generates_all_figures() {
    let fig_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("figures");

    fs::remove_dir_all(&fig_dir).ok();
    fs::create_dir_all(&fig_dir).expect("failed to create figure directory");

    let fig_dir_str = fig_dir
        .to_str()
        .expect("failed to convert figure directory to string");

    let bin = PathBuf::from(env!("CARGO_BIN_EXE_cournot"));
    let output = Command::new(bin)
        .args(["--fig-dir", fig_dir_str])
        .output()
        .expect("failed to execute command");

    let stdout_str =
        std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

    assert!(
        output.status.success(),
        "failed to run binary\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
    );

    let expected = [
        "qnLine.png",
        "UniformUnique.jpg",
        "UniformNoEq.jpg",
        "BiModalMultipleEq.jpg",
        "BiModalUniqueEq.jpg",
        "BiModalUniqueEq_Assumption2Violated.png",
    ];
    for name in expected {
        let path = fig_dir.join(name);
        let meta = fs::metadata(&path).unwrap_or_else(|_| panic!("missing figure {path:?}"));
        assert!(meta.len() > 0, "figure {path:?} is empty");
    }

    // One parameter report per scenario.
    assert_eq!(stdout_str.matches("alpha_star:").count(), 5);
    assert_eq!(stdout_str.matches("Distribution:").count(), 5);
    assert_eq!(stdout_str.matches("price slope: 1.300").count(), 5);

    fs::remove_dir_all(&fig_dir).ok();
}
