use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use super::Graph;
use crate::error::{CombsolError, GraphError};
use crate::graph_error;

/// Largest vertex count an edge list may imply.
pub const MAX_EDGE_LIST_VERTICES: usize = 1 << 24;

/// Parse an edge list: one edge per line, two vertex ids separated by whitespace and/or a comma.
/// Blank lines and lines starting with `#` are ignored. The vertex count is one more than the
/// largest id seen, and must not exceed [MAX_EDGE_LIST_VERTICES].
pub fn parse_edge_list(text: &str) -> Result<Graph, CombsolError> {
    let mut edges = Vec::new();
    let mut n = 0;
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parse_err = || {
            graph_error!(ParseError {
                line: lineno + 1,
                content: line.to_string()
            })
        };
        let ids = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<usize>().map_err(|_| parse_err()))
            .collect::<Result<Vec<_>, _>>()?;
        let &[a, b] = ids.as_slice() else {
            return Err(parse_err());
        };
        if a.max(b) >= MAX_EDGE_LIST_VERTICES {
            return Err(parse_err());
        }
        n = n.max(a.max(b) + 1);
        edges.push((a, b));
    }
    Graph::from_edges(n, &edges)
}

pub fn read_edge_list(path: impl AsRef<Path>) -> Result<Graph, CombsolError> {
    let mut text = String::new();
    File::open(path)?.read_to_string(&mut text)?;
    parse_edge_list(&text)
}

/// Write the graph's edges as `a b` lines, in edge order.
pub fn write_edge_list<W: Write>(graph: &Graph, writer: &mut W) -> Result<(), CombsolError> {
    for (a, b) in graph.edges() {
        writeln!(writer, "{a} {b}")?;
    }
    Ok(())
}

pub fn save_edge_list(graph: &Graph, path: impl AsRef<Path>) -> Result<(), CombsolError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_edge_list(graph, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whitespace_and_comma_separated_pairs() {
        let g = parse_edge_list("0 1\n1,2\n\n# comment\n 2 ,  5 \n").unwrap();
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 5)]);
        assert_eq!(g.degree(4).unwrap(), 0);
    }

    #[test]
    fn empty_text_is_the_empty_graph() {
        let g = parse_edge_list("").unwrap();
        assert_eq!(g.vertex_count(), 0);
    }

    #[test]
    fn malformed_lines_report_their_line_number() {
        for text in ["0 1\n1 x\n", "0 1\n1\n", "0 1\n1 2 3\n"] {
            match parse_edge_list(text) {
                Err(CombsolError::GraphError(GraphError::ParseError { line, .. })) => {
                    assert_eq!(line, 2)
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn huge_vertex_ids_are_rejected() {
        let max = MAX_EDGE_LIST_VERTICES;
        for text in [
            format!("0 1\n0 {}\n", usize::MAX),
            format!("0 1\n{} 3\n", max),
            "0 1\n0 4000000000\n".to_string(),
        ] {
            match parse_edge_list(&text) {
                Err(CombsolError::GraphError(GraphError::ParseError { line, .. })) => {
                    assert_eq!(line, 2)
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn written_edge_list_reads_back() {
        let g = Graph::complete(5);
        let mut buf = Vec::new();
        write_edge_list(&g, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("0 1\n0 2\n"));
        let h = parse_edge_list(&text).unwrap();
        assert_eq!(h.edges().collect::<Vec<_>>(), g.edges().collect::<Vec<_>>());
    }
}
