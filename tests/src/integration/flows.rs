//! # Health Check Flows
//!
//! Full cycles through `HealthCheck`: the poller queries a scripted fleet,
//! the results are classified and summarized, and the report is rendered.
//!
//! ## Flows Tested:
//!
//! 1. **Mixed fleet**: one healthy node, one unreachable, exact report text
//! 2. **Repeat cycles**: identical output, fresh queries every cycle
//! 3. **Concurrency**: completion order never leaks into report order
//! 4. **Version policy**: degrade leaves a blank cell, strict aborts

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use pn_monitor::test_utils::MockNodeRpc;
    use pn_monitor::{
        Classification, HealthCheck, MonitorError, NodeEndpoint, NodePoller, PollError,
        PollerConfig, RawStatus, VersionPolicy, REPORT_TITLE,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn endpoint(name: &str) -> NodeEndpoint {
        NodeEndpoint::new(name, name, 9092)
    }

    fn fleet(names: &[&str]) -> Vec<NodeEndpoint> {
        names.iter().map(|n| endpoint(n)).collect()
    }

    fn check(
        rpc: &Arc<MockNodeRpc>,
        names: &[&str],
        include_version: bool,
        config: PollerConfig,
        width: usize,
    ) -> HealthCheck<NodePoller<MockNodeRpc>> {
        let poller = NodePoller::with_config(rpc.clone(), config);
        HealthCheck::new(poller, fleet(names), include_version, width)
    }

    fn sequential(version_policy: VersionPolicy) -> PollerConfig {
        PollerConfig {
            concurrency: 1,
            version_policy,
        }
    }

    // =============================================================================
    // FLOW 1: MIXED FLEET
    // =============================================================================

    #[tokio::test]
    async fn test_healthy_and_unreachable_node() {
        let rpc = Arc::new(MockNodeRpc::new().with_layers("n1:9092", 100, 99, 98, 5));
        let report = check(&rpc, &["n1", "n2"], false, PollerConfig::default(), 200)
            .run()
            .await
            .unwrap();

        let rule = "=".repeat(53);
        assert_eq!(
            report.lines,
            vec![
                rule.as_str(),
                REPORT_TITLE,
                rule.as_str(),
                "Node Port Status            Peers Top Synced Verified",
                "---- ---- ----------------- ----- --- ------ --------",
                "n1   9092 SYNCED & VERIFIED     5 100     99       98",
                "n2   9092 NOT CONNECTED",
                rule.as_str(),
                "Not synced: 1/2, Synced: 1/2, Verified: 1/2",
                rule.as_str(),
            ]
        );

        assert_eq!(
            report.cycle.classifications(),
            &[Classification::SyncedAndVerified, Classification::NotConnected]
        );
        assert_eq!(report.cycle.connected_count(), 1);
    }

    #[tokio::test]
    async fn test_eight_node_fleet_summary() {
        let rpc = MockNodeRpc::new()
            .with_layers("n1:9092", 100, 99, 98, 5)
            .with_layers("n2:9092", 100, 98, 90, 4)
            .with_layers("n3:9092", 100, 100, 50, 3)
            .with_layers("n4:9092", 100, 90, 90, 2)
            .with_status(
                "n7:9092",
                RawStatus {
                    connected_peers: Some(1),
                    top_layer: Some(100),
                    ..Default::default()
                },
            )
            .with_layers("n8:9092", 100, 50, 50, 0);
        let rpc = Arc::new(rpc);

        let names = ["n1", "n2", "n3", "n4", "n5", "n6", "n7", "n8"];
        let report = check(&rpc, &names, false, PollerConfig::default(), 120)
            .run()
            .await
            .unwrap();

        let summary = report.cycle.summary();
        assert_eq!(summary.to_string(), "Not synced: 5/8, Synced: 3/8, Verified: 1/8");
        assert_eq!(report.cycle.connected_count(), 5);

        // A node missing layer numbers is treated as unreachable
        let n7 = &report.cycle.statuses()[6];
        assert!(!n7.connected);
        assert_eq!(n7.connected_peers, None);
        assert!(report.lines.iter().any(|l| l == "n7   9092 NOT CONNECTED"));
    }

    #[tokio::test]
    async fn test_report_fits_narrow_terminal() {
        let rpc = Arc::new(
            MockNodeRpc::new()
                .with_layers("n1:9092", 123_456, 123_455, 123_400, 42)
                .with_version("n1:9092", "v1.6.3-rc.1"),
        );
        for width in [1, 10, 30, 45] {
            let report = check(&rpc, &["n1", "n2"], true, PollerConfig::default(), width)
                .run()
                .await
                .unwrap();
            for line in &report.lines {
                assert!(console::measure_text_width(line) <= width, "{line:?} exceeds {width}");
            }
        }
    }

    // =============================================================================
    // FLOW 2: REPEAT CYCLES
    // =============================================================================

    #[tokio::test]
    async fn test_cycles_are_independent() {
        let rpc = Arc::new(MockNodeRpc::new().with_layers("n1:9092", 10, 10, 10, 1));
        let check = check(&rpc, &["n1", "n2"], false, PollerConfig::default(), 80);

        let first = check.run().await.unwrap();
        let second = check.run().await.unwrap();

        assert_eq!(first.lines, second.lines);
        assert_eq!(rpc.status_calls(), 4);
    }

    // =============================================================================
    // FLOW 3: CONCURRENCY
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_report_order_is_endpoint_order() {
        let rpc = Arc::new(
            MockNodeRpc::new()
                .with_layers("n1:9092", 1, 1, 1, 1)
                .with_delay("n1:9092", Duration::from_millis(300))
                .with_layers("n2:9092", 2, 2, 2, 2)
                .with_delay("n2:9092", Duration::from_millis(200))
                .with_layers("n3:9092", 3, 3, 3, 3)
                .with_delay("n3:9092", Duration::from_millis(100))
                .with_layers("n4:9092", 4, 4, 4, 4),
        );
        let config = PollerConfig {
            concurrency: 2,
            version_policy: VersionPolicy::Degrade,
        };

        let report = check(&rpc, &["n1", "n2", "n3", "n4"], false, config, 80)
            .run()
            .await
            .unwrap();

        let names: Vec<&str> = report
            .cycle
            .statuses()
            .iter()
            .map(|s| s.endpoint.name())
            .collect();
        assert_eq!(names, vec!["n1", "n2", "n3", "n4"]);
        assert!(rpc.max_in_flight() <= 2);

        let rows: Vec<&String> = report.lines[5..9].iter().collect();
        for (row, name) in rows.iter().zip(["n1", "n2", "n3", "n4"]) {
            assert!(row.starts_with(name), "{row:?} should be {name}");
        }
    }

    #[tokio::test]
    async fn test_concurrency_one_is_strictly_sequential() {
        let rpc = Arc::new(
            MockNodeRpc::new()
                .with_layers("n1:9092", 5, 5, 5, 1)
                .with_version("n1:9092", "v1")
                .with_layers("n2:9092", 5, 5, 5, 1)
                .with_version("n2:9092", "v2"),
        );

        check(&rpc, &["n1", "n2"], true, sequential(VersionPolicy::Degrade), 80)
            .run()
            .await
            .unwrap();

        assert_eq!(rpc.max_in_flight(), 1);
        assert_eq!(
            rpc.call_log(),
            vec!["status n1:9092", "version n1:9092", "status n2:9092", "version n2:9092"]
        );
    }

    // =============================================================================
    // FLOW 4: VERSION POLICY
    // =============================================================================

    fn versioned_fleet() -> Arc<MockNodeRpc> {
        Arc::new(
            MockNodeRpc::new()
                .with_layers("n1:9092", 100, 99, 98, 5)
                .with_version("n1:9092", "v1.6.3")
                .with_layers("n2:9092", 100, 99, 98, 5)
                .with_layers("n3:9092", 100, 99, 98, 5)
                .with_version("n3:9092", "v1.6.3"),
        )
    }

    #[tokio::test]
    async fn test_version_failure_degrades() {
        let rpc = versioned_fleet();
        let report = check(&rpc, &["n1", "n2", "n3"], true, sequential(VersionPolicy::Degrade), 200)
            .run()
            .await
            .unwrap();

        assert!(report.lines[3].starts_with("Node Port Version Status"));
        assert!(report.lines[5].starts_with("n1   9092 v1.6.3  SYNCED & VERIFIED"));
        assert!(report.lines[6].starts_with("n2   9092         SYNCED & VERIFIED"));
        assert_eq!(report.cycle.statuses()[1].version, None);
        assert_eq!(
            report.cycle.summary().to_string(),
            "Not synced: 0/3, Synced: 3/3, Verified: 3/3"
        );
    }

    #[tokio::test]
    async fn test_strict_version_aborts_cycle() {
        let rpc = versioned_fleet();
        let err = check(&rpc, &["n1", "n2", "n3"], true, sequential(VersionPolicy::Abort), 200)
            .run()
            .await
            .unwrap_err();

        match err {
            MonitorError::Poll(PollError::VersionQuery { endpoint, .. }) => {
                assert_eq!(endpoint, "n2:9092");
            }
            other => panic!("unexpected error: {other}"),
        }
        // n3 is never queried once n2 has failed
        assert_eq!(rpc.status_calls(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_node_skips_version_query() {
        let rpc = Arc::new(
            MockNodeRpc::new()
                .with_layers("n1:9092", 1, 1, 1, 1)
                .with_version("n1:9092", "v1"),
        );
        let report = check(&rpc, &["n1", "n2"], true, sequential(VersionPolicy::Abort), 80)
            .run()
            .await
            .unwrap();

        assert_eq!(rpc.version_calls(), 1);
        assert_eq!(report.cycle.connected_count(), 1);
    }
}
