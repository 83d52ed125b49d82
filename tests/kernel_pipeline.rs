use parkernel::{DfsMode, Error, InputProvider, Kernel, KernelConfig, Operation, OutputSink};

fn kernel(config: KernelConfig) -> Kernel {
    Kernel::new(KernelConfig {
        threads: Some(4),
        ..config
    })
    .unwrap()
}

#[test]
fn graph_phase_writes_bfs_then_dfs() {
    let mut input = InputProvider::new("5\n4\n0 1\n0 2\n1 3\n1 4\n");
    let graph = input.read_graph().unwrap();
    let kernel = kernel(KernelConfig::default());
    let mut sink = OutputSink::new(Vec::new());

    let reports = kernel.run_graph(&graph, &mut sink);
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].operation, Operation::Bfs);
    assert_eq!(reports[1].operation, Operation::Dfs);
    assert!(matches!(reports[0].result, Ok(5)));
    assert!(matches!(reports[1].result, Ok(5)));

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "BFS traversal starting from node 0: 0 1 2 3 4");
    assert!(lines[1].starts_with("DFS traversal starting from node 0: 0"));

    let mut dfs: Vec<usize> = lines[1]
        .split(':')
        .nth(1)
        .unwrap()
        .split_whitespace()
        .map(|t| t.parse().unwrap())
        .collect();
    dfs.sort_unstable();
    assert_eq!(dfs, vec![0, 1, 2, 3, 4]);
}

#[test]
fn sort_phase_writes_both_results() {
    assert!(InputProvider::new("").read_array().is_err());

    let mut input = InputProvider::new("5\n5 2 9 1 5\n");
    let values = input.read_array().unwrap();
    let kernel = kernel(KernelConfig {
        merge_cutoff: 1,
        ..KernelConfig::default()
    });
    let mut sink = OutputSink::new(Vec::new());

    let reports = kernel.run_sort(&values, &mut sink);
    assert!(reports.iter().all(|r| r.is_ok()));
    assert_eq!(
        String::from_utf8(sink.into_inner()).unwrap(),
        "Sorted array using Bubble Sort: 1 2 5 5 9\nSorted array using Merge Sort: 1 2 5 5 9\n"
    );
}

#[test]
fn start_vertex_comes_from_config() {
    let graph = InputProvider::new("4 3 0 1 1 2 2 3").read_graph().unwrap();
    let kernel = kernel(KernelConfig {
        start_vertex: 3,
        dfs_mode: DfsMode::Hardened,
        ..KernelConfig::default()
    });
    let mut sink = OutputSink::new(Vec::new());

    kernel.run_graph(&graph, &mut sink);
    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        text,
        "BFS traversal starting from node 3: 3 2 1 0\nDFS traversal starting from node 3: 3 2 1 0\n"
    );
}

#[test]
fn empty_graph_writes_empty_sequences() {
    let graph = InputProvider::new("0 0").read_graph().unwrap();
    let kernel = kernel(KernelConfig::default());
    let mut sink = OutputSink::new(Vec::new());

    let reports = kernel.run_graph(&graph, &mut sink);
    assert!(reports.iter().all(|r| matches!(r.result, Ok(0))));
    assert_eq!(
        String::from_utf8(sink.into_inner()).unwrap(),
        "BFS traversal starting from node 0:\nDFS traversal starting from node 0:\n"
    );
}

#[test]
fn malformed_graph_input_is_reported_before_any_traversal() {
    let err = InputProvider::new("3 2 0 1").read_graph().unwrap_err();
    assert!(matches!(err, Error::MalformedInput { .. }));
}
