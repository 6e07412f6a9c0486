use std::{fs, path::Path};

use crate::{Error, Result, WeightedGraph};

/// Parses `<u> <v> <weight>` lines. Blank lines and `#` comments are skipped.
pub fn parse_edge_list(input: &str) -> Result<WeightedGraph> {
    let mut edges = Vec::new();

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [u, v, w] = fields.as_slice() else {
            return Err(Error::invalid_input(format!(
                "Line {line_no}: expected '<u> <v> <weight>' but got: {line}"
            )));
        };

        let u: usize = u.parse().map_err(|_| {
            Error::invalid_input(format!("Line {line_no}: invalid node id: {u}"))
        })?;
        let v: usize = v.parse().map_err(|_| {
            Error::invalid_input(format!("Line {line_no}: invalid node id: {v}"))
        })?;
        let w: f64 = w.parse().map_err(|_| {
            Error::invalid_input(format!("Line {line_no}: invalid weight: {w}"))
        })?;

        edges.push((u, v, w));
    }

    if edges.is_empty() {
        return Err(Error::invalid_input("No edges provided."));
    }

    log::debug!("edge_list: parsed edges={}", edges.len());
    WeightedGraph::from_edges(edges)
}

pub fn read_edge_list(path: &Path) -> Result<WeightedGraph> {
    let input = fs::read_to_string(path).map_err(|e| {
        Error::invalid_input(format!("failed to read edge list {}: {e}", path.display()))
    })?;
    parse_edge_list(&input)
}

/// One `u v weight` line per edge with `u < v`.
pub fn format_edge_list(graph: &WeightedGraph) -> String {
    let mut buf = ryu::Buffer::new();
    graph
        .edges()
        .map(|(u, v, w)| format!("{u} {v} {}\n", buf.format(w)))
        .collect()
}

pub fn write_edge_list(graph: &WeightedGraph, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format_edge_list(graph))?;
    log::info!(
        "edge_list: wrote n={} edges={} path={}",
        graph.n(),
        graph.edges().count(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::{format_edge_list, parse_edge_list, read_edge_list, write_edge_list};
    use crate::{Error, WeightedGraph};

    #[test]
    fn parses_whitespace_separated_triples() {
        let graph = parse_edge_list("0 1 10\n0 2\t15.5\n\n1 2 35 # long edge\n").expect("parse");
        assert_eq!(graph.n(), 3);
        assert_eq!(graph.weight(0, 2), Some(15.5));
        assert_eq!(graph.weight(2, 1), Some(35.0));
    }

    #[test]
    fn skips_comment_lines() {
        let graph = parse_edge_list("# header\n0 1 1\n").expect("parse");
        assert_eq!(graph.edges().count(), 1);
    }

    #[test]
    fn rejects_wrong_field_count_with_line_number() {
        let err = parse_edge_list("0 1 1\n0 2\n").expect_err("missing weight");
        assert!(err.to_string().contains("Line 2: expected '<u> <v> <weight>'"));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let err = parse_edge_list("a 1 1").expect_err("bad node");
        assert!(err.to_string().contains("invalid node id: a"));

        let err = parse_edge_list("0 1 heavy").expect_err("bad weight");
        assert!(err.to_string().contains("invalid weight: heavy"));
    }

    #[test]
    fn rejects_empty_input() {
        let err = parse_edge_list(" \n# nothing\n").expect_err("empty");
        assert!(err.to_string().contains("No edges provided."));
    }

    #[test]
    fn rejects_node_ids_far_beyond_the_edge_count() {
        let err = parse_edge_list("18446744073709551615 0 1\n").expect_err("id overflows");
        assert!(matches!(err, Error::InvalidGraph(_)));

        let err = parse_edge_list("0 1 1\n1 2 1\n2 0 1\n3000000000 0 1\n")
            .expect_err("isolated ids");
        assert!(matches!(err, Error::InvalidGraph(_)));
        assert!(err.to_string().contains("3000000000"));
    }

    #[test]
    fn negative_weights_are_graph_errors() {
        let err = parse_edge_list("0 1 -3").expect_err("negative");
        assert!(matches!(err, Error::InvalidGraph(_)));
    }

    #[test]
    fn formatted_output_parses_back_to_the_same_graph() {
        let graph = WeightedGraph::from_fn(4, |u, v| (u * 10 + v) as f64 / 4.0).expect("graph");
        let text = format_edge_list(&graph);
        assert!(text.starts_with("0 1 0.25\n"));
        assert_eq!(parse_edge_list(&text).expect("parse"), graph);
    }

    #[test]
    fn write_then_read_from_disk() {
        let dir = env::temp_dir().join(format!("tsp-bnb-edge-list-{}", process::id()));
        let path = dir.join("graph.txt");
        let graph = WeightedGraph::from_edges([(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)])
            .expect("graph");

        write_edge_list(&graph, &path).expect("write");
        let read = read_edge_list(&path).expect("read");
        fs::remove_dir_all(&dir).expect("cleanup");

        assert_eq!(read, graph);
    }
}
