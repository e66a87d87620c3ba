//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - Mock e2e 测试（不启动子进程）
//! - 真实子进程 e2e 测试（unix, `sh`）

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }

    #[test]
    fn test_both_runners_share_one_stage_list() {
        let definition = contracts::PipelineDefinition::default();
        assert_eq!(definition.resolve_stages(), definition.resolve_stages());
        assert_eq!(definition.stages.len(), 5);
    }
}

#[cfg(test)]
mod e2e_tests {
    use contracts::{OutputMode, PipelineDefinition, StageSpec};
    use runner::{MockExecutor, StageRunner};

    fn default_stages() -> Vec<StageSpec> {
        PipelineDefinition::default().resolve_stages()
    }

    /// Every stage exits 0 -> success, exit code 0
    #[tokio::test]
    async fn test_all_stages_succeed() {
        for mode in [OutputMode::Stream, OutputMode::Capture] {
            let runner = StageRunner::new(MockExecutor::new(), mode);
            let summary = runner.run(&default_stages(), &mut ()).await;

            assert!(summary.is_success());
            assert_eq!(summary.completed.len(), 5);
            assert_eq!(runner.executor().invocation_count(), 5);
        }
    }

    /// For every position k, a failure at k stops the run at k
    #[tokio::test]
    async fn test_first_failure_at_every_position() {
        let stages = default_stages();

        for k in 0..stages.len() {
            let executor = MockExecutor::new().fail_stage(stages[k].name.clone(), 7);
            let runner = StageRunner::new(executor, OutputMode::Stream);

            let summary = runner.run(&stages, &mut ()).await;

            let failure = summary.failure.expect("run should fail");
            assert_eq!(failure.index, k);
            assert_eq!(failure.name, stages[k].name);
            assert_eq!(summary.completed.len(), k);

            let invoked = runner.executor().invoked();
            let expected: Vec<_> = stages[..=k].iter().map(|s| s.name.clone()).collect();
            assert_eq!(invoked, expected, "stages after {k} must not run");
        }
    }

    /// Stage exits 3 -> runner exit code 3
    #[tokio::test]
    async fn test_exit_code_propagates() {
        let executor = MockExecutor::new().fail_stage("Model Building", 3);
        let runner = StageRunner::new(executor, OutputMode::Stream);

        let summary = runner.run(&default_stages(), &mut ()).await;

        assert_eq!(summary.failure.unwrap().process_exit_code(), 3);
    }

    /// Stage 3 of 5 exits 2 -> stages 4 and 5 never run
    #[tokio::test]
    async fn test_stage_three_of_five_fails() {
        let executor = MockExecutor::new().fail_stage("Feature Engineering", 2);
        let runner = StageRunner::new(executor, OutputMode::Capture);

        let summary = runner.run(&default_stages(), &mut ()).await;

        let failure = summary.failure.unwrap();
        assert_eq!(failure.index, 2);
        assert_eq!(failure.exit_code, 2);
        let invoked = runner.executor().invoked();
        assert!(!invoked.contains(&"Model Building".to_string()));
        assert!(!invoked.contains(&"Model Evaluation".to_string()));
    }
}

#[cfg(all(test, unix))]
mod process_e2e_tests {
    use std::path::Path;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{OutputMode, StageSpec};
    use report::ExperimentReport;
    use runner::{ProcessExecutor, StageRunner};

    /// Build a pipeline of `sh` stages that each drop a marker file
    fn marker_pipeline(failing: Option<(usize, i32)>) -> String {
        let mut toml = String::from("interpreter = \"sh\"\n");
        for i in 1..=5 {
            let script = match failing {
                Some((k, code)) if k == i => format!("exit {code}"),
                _ => format!("touch stage{i}.done"),
            };
            toml.push_str(&format!(
                "\n[[stages]]\nname = \"stage {i}\"\ncommand = \"-c\"\nargs = [\"{script}\"]\n"
            ));
        }
        toml
    }

    fn stages_from(toml: &str) -> Vec<StageSpec> {
        ConfigLoader::load_from_str(toml, ConfigFormat::Toml)
            .unwrap()
            .resolve_stages()
    }

    fn marker(dir: &Path, i: usize) -> bool {
        dir.join(format!("stage{i}.done")).exists()
    }

    #[tokio::test]
    async fn test_real_processes_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let runner = StageRunner::new(
            ProcessExecutor::with_working_dir(dir.path()),
            OutputMode::Capture,
        );

        let summary = runner.run(&stages_from(&marker_pipeline(None)), &mut ()).await;

        assert!(summary.is_success());
        assert!((1..=5).all(|i| marker(dir.path(), i)));
    }

    #[tokio::test]
    async fn test_real_process_failure_stops_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let runner = StageRunner::new(
            ProcessExecutor::with_working_dir(dir.path()),
            OutputMode::Stream,
        );

        let summary = runner
            .run(&stages_from(&marker_pipeline(Some((3, 2)))), &mut ())
            .await;

        let failure = summary.failure.unwrap();
        assert_eq!(failure.name, "stage 3");
        assert_eq!(failure.process_exit_code(), 2);
        assert!(marker(dir.path(), 1));
        assert!(marker(dir.path(), 2));
        assert!(!marker(dir.path(), 4));
        assert!(!marker(dir.path(), 5));
    }

    #[tokio::test]
    async fn test_missing_executable_fails_stage() {
        let stages = vec![
            StageSpec::new("ingest", "sh").arg("-c").arg("true"),
            StageSpec::new("ghost", "./no-such-stage"),
            StageSpec::new("never", "sh").arg("-c").arg("touch never.done"),
        ];
        let dir = tempfile::tempdir().unwrap();
        let runner = StageRunner::new(
            ProcessExecutor::with_working_dir(dir.path()),
            OutputMode::Capture,
        );

        let summary = runner.run(&stages, &mut ()).await;

        let failure = summary.failure.unwrap();
        assert_eq!(failure.name, "ghost");
        assert_eq!(failure.exit_code, contracts::SPAWN_FAILURE_EXIT_CODE);
        assert!(!dir.path().join("never.done").exists());
    }

    /// Stages write the artifacts; the report reads them back
    #[tokio::test]
    async fn test_experiment_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let stages = vec![
            StageSpec::new("params", "sh")
                .arg("-c")
                .arg("printf 'train:\\n  epochs: 10\\n  lr: 0.01\\n' > params.yaml"),
            StageSpec::new("evaluate", "sh").arg("-c").arg(
                "mkdir -p reports && printf '{\"accuracy\": 0.8765, \"f1\": 0.91}' > reports/metrics.json",
            ),
        ];
        let runner = StageRunner::new(
            ProcessExecutor::with_working_dir(dir.path()),
            OutputMode::Capture,
        );

        let summary = runner.run(&stages, &mut ()).await;
        assert!(summary.is_success());

        let report = ExperimentReport::load(
            &dir.path().join("reports/metrics.json"),
            &dir.path().join("params.yaml"),
        )
        .unwrap();
        let text = report.to_string();

        assert!(text.contains("  accuracy       : 0.8765\n"));
        assert!(text.contains("  f1             : 0.9100\n"));
        assert!(text.contains("  train:\n    epochs: 10\n    lr: 0.01\n"));
        assert!(text.contains("Tips:"));
    }

    /// Captured stderr of the failing stage reaches the summary
    #[tokio::test]
    async fn test_experiment_failure_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let stages = vec![
            StageSpec::new("ok", "sh").arg("-c").arg("echo fine"),
            StageSpec::new("bad", "sh")
                .arg("-c")
                .arg("echo 'ValueError: empty dataset' >&2; exit 1"),
        ];
        let runner = StageRunner::new(
            ProcessExecutor::with_working_dir(dir.path()),
            OutputMode::Capture,
        );

        let summary = runner.run(&stages, &mut ()).await;

        let failure = summary.failure.unwrap();
        assert_eq!(failure.index, 1);
        assert_eq!(
            failure.stderr.as_deref(),
            Some("ValueError: empty dataset\n")
        );
    }
}
