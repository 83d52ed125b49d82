//! System boundary: the input provider and the output sink.
//!
//! Input is a stream of whitespace-separated integers:
//! - graph input: vertex count, edge count, then one `u v` pair per edge
//! - sort input: element count, then that many integers
//!
//! Output is one line per operation: a label, a colon, then the values.

use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

use crate::error::malformed_input;
use crate::graph::Graph;
use crate::Result;

/// Pulls counts, edges and array elements out of whitespace-separated text.
#[derive(Debug, Clone)]
pub struct InputProvider {
    tokens: Vec<String>,
    position: usize,
}

impl InputProvider {
    /// Tokenizes `text`.
    pub fn new(text: &str) -> Self {
        Self {
            tokens: text.split_whitespace().map(str::to_owned).collect(),
            position: 0,
        }
    }

    /// Reads all of `reader` and tokenizes it.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if reading fails or the input is not UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::new(&text))
    }

    /// Number of tokens not consumed yet.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.position
    }

    /// Reads a graph: vertex count, edge count, then the edge endpoints.
    ///
    /// # Errors
    /// - [`crate::Error::MalformedInput`] if a count or endpoint is missing,
    ///   negative or not an integer
    /// - [`crate::Error::CapacityExceeded`] if the vertex count is too large
    ///   to allocate
    /// - [`crate::Error::InvalidVertex`] if an endpoint is out of range
    pub fn read_graph(&mut self) -> Result<Graph> {
        let vertex_count = self.read_count("vertex count")?;
        let edge_count = self.read_count("edge count")?;

        let mut graph = Graph::try_new(vertex_count)?;
        for edge in 0..edge_count {
            let u = self.read_value::<usize>(|| format!("source of edge {edge} of {edge_count}"))?;
            let v =
                self.read_value::<usize>(|| format!("destination of edge {edge} of {edge_count}"))?;
            graph.add_edge(u, v)?;
        }
        tracing::debug!(vertex_count, edge_count, "graph input read");
        Ok(graph)
    }

    /// Reads an array: element count, then the elements.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedInput`] if the count or an element is
    /// missing or not an integer.
    pub fn read_array(&mut self) -> Result<Vec<i64>> {
        let len = self.read_count("element count")?;
        let mut values = Vec::with_capacity(len.min(self.remaining()));
        for index in 0..len {
            values.push(self.read_value::<i64>(|| format!("element {index} of {len}"))?);
        }
        tracing::debug!(len, "array input read");
        Ok(values)
    }

    fn read_count(&mut self, what: &str) -> Result<usize> {
        self.read_value::<usize>(|| what.to_string())
    }

    fn read_value<T>(&mut self, what: impl Fn() -> String) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let Some(token) = self.tokens.get(self.position) else {
            return Err(malformed_input!("expected {} but input ended", what()));
        };
        let value = token
            .parse::<T>()
            .map_err(|e| malformed_input!("expected {} but found `{}`: {}", what(), token, e))?;
        self.position += 1;
        Ok(value)
    }
}

/// Writes labeled integer sequences, flushing after each one.
#[derive(Debug)]
pub struct OutputSink<W: Write> {
    writer: W,
}

impl<W: Write> OutputSink<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `label: v0 v1 ..` as one line and flushes.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if writing or flushing fails.
    pub fn emit<T: Display>(&mut self, label: &str, values: &[T]) -> Result<()> {
        write!(self.writer, "{label}:")?;
        for value in values {
            write!(self.writer, " {value}")?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn reads_graph_in_declared_order() {
        let mut input = InputProvider::new("5\n4\n0 1\n0 2\n1 3\n1 4\n");
        let graph = input.read_graph().unwrap();
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.neighbors(1).unwrap(), &[0, 3, 4]);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn missing_edge_is_malformed() {
        let err = InputProvider::new("3 2 0 1 2").read_graph().unwrap_err();
        match err {
            Error::MalformedInput { message } => assert!(message.contains("destination of edge 1")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_count_is_malformed() {
        let err = InputProvider::new("-3").read_array().unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn out_of_range_endpoint_is_invalid_vertex() {
        let err = InputProvider::new("2 1 0 7").read_graph().unwrap_err();
        assert!(matches!(err, Error::InvalidVertex { vertex: 7, vertex_count: 2 }));
    }

    #[test]
    fn huge_vertex_count_is_reported_not_allocated() {
        let err = InputProvider::new("1000000000000000000 0").read_graph().unwrap_err();
        assert!(matches!(
            err,
            Error::CapacityExceeded {
                vertex_count: 1_000_000_000_000_000_000
            }
        ));
    }

    #[test]
    fn reads_array_with_negatives() {
        let mut input = InputProvider::new("4  5 -2 9\t0");
        assert_eq!(input.read_array().unwrap(), vec![5, -2, 9, 0]);
    }

    #[test]
    fn short_array_is_malformed() {
        let err = InputProvider::new("3 1 2").read_array().unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn sink_writes_label_then_values() {
        let mut sink = OutputSink::new(Vec::new());
        sink.emit("BFS traversal starting from node 0", &[0usize, 1, 2]).unwrap();
        sink.emit::<i64>("Sorted array using Merge Sort", &[]).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "BFS traversal starting from node 0: 0 1 2\nSorted array using Merge Sort:\n"
        );
    }
}
