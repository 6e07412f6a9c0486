use std::{
    fmt,
    io::Read,
    path::{Path, PathBuf},
};

use crate::{
    Result, WeightedGraph,
    graph::generate,
    io::{edge_list, options::SolverOptions},
};

/// Where the graph to solve comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphSource {
    Random { nodes: usize, seed: u64 },
    File(PathBuf),
    Stdin,
}

impl GraphSource {
    /// Random generation wins over `--input`; no input path means stdin.
    pub fn from_options(options: &SolverOptions) -> Self {
        if let Some(nodes) = options.random_nodes {
            return Self::Random {
                nodes,
                seed: options.seed,
            };
        }
        match options.input_path() {
            Some(path) => Self::File(path.to_path_buf()),
            None => Self::Stdin,
        }
    }

    pub fn load(&self) -> Result<WeightedGraph> {
        let graph = match self {
            Self::Random { nodes, seed } => generate::random_euclidean(*nodes, *seed)?,
            Self::File(path) => edge_list::read_edge_list(path)?,
            Self::Stdin => read_graph_from_stdin()?,
        };
        log::info!(
            "input: source={self} n={} edges={}",
            graph.n(),
            graph.edges().count()
        );
        Ok(graph)
    }
}

impl fmt::Display for GraphSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random { nodes, seed } => write!(f, "random(nodes={nodes},seed={seed})"),
            Self::File(path) => write!(f, "file({})", path.display()),
            Self::Stdin => f.write_str("stdin"),
        }
    }
}

/// Loads the graph described by `options` and saves it when `--save-graph` is set.
pub fn load_graph(options: &SolverOptions) -> Result<WeightedGraph> {
    let graph = GraphSource::from_options(options).load()?;
    if let Some(path) = options.save_graph_path() {
        save_graph(&graph, path)?;
    }
    Ok(graph)
}

fn save_graph(graph: &WeightedGraph, path: &Path) -> Result<()> {
    edge_list::write_edge_list(graph, path)
}

fn read_graph_from_stdin() -> Result<WeightedGraph> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    edge_list::parse_edge_list(&input)
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf, process};

    use super::{GraphSource, load_graph};
    use crate::io::options::SolverOptions;

    #[test]
    fn random_nodes_take_precedence_over_input() {
        let options = SolverOptions {
            input: "graph.txt".to_string(),
            random_nodes: Some(5),
            seed: 3,
            ..SolverOptions::default()
        };
        assert_eq!(
            GraphSource::from_options(&options),
            GraphSource::Random { nodes: 5, seed: 3 }
        );
    }

    #[test]
    fn input_path_selects_file_and_dash_selects_stdin() {
        let options = SolverOptions {
            input: "graph.txt".to_string(),
            ..SolverOptions::default()
        };
        assert_eq!(
            GraphSource::from_options(&options),
            GraphSource::File(PathBuf::from("graph.txt"))
        );

        let options = SolverOptions {
            input: "-".to_string(),
            ..SolverOptions::default()
        };
        assert_eq!(GraphSource::from_options(&options), GraphSource::Stdin);
    }

    #[test]
    fn display_names_the_source() {
        assert_eq!(
            GraphSource::Random { nodes: 4, seed: 1 }.to_string(),
            "random(nodes=4,seed=1)"
        );
        assert_eq!(GraphSource::Stdin.to_string(), "stdin");
    }

    #[test]
    fn load_graph_saves_then_reloads_the_same_graph() {
        let dir = env::temp_dir().join(format!("tsp-bnb-input-{}", process::id()));
        let saved = dir.join("graph.txt");
        let options = SolverOptions {
            random_nodes: Some(6),
            seed: 21,
            save_graph: saved.display().to_string(),
            ..SolverOptions::default()
        };

        let generated = load_graph(&options).expect("generate and save");
        let reloaded = GraphSource::File(saved.clone()).load().expect("reload");
        fs::remove_dir_all(&dir).expect("cleanup");

        assert_eq!(reloaded, generated);
    }
}
