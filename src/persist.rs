//! Plain-text persistence for layered nets.
//!
//! Line-oriented format, one value per line:
//!
//! ```text
//! <input width>
//! <hidden width>      (0 for a net without hidden layer)
//! <output width>
//! <weight(0, 0)>
//! <weight(0, 1)>
//! ...                 (neuron_count^2 weights, row-major, zeros at non-edges)
//! ```
//!
//! The format carries a single hidden width, so only nets with at most one hidden
//! layer can be written.

use std::io::{BufRead, Read, Write};
use std::path::Path;

use crate::{Error, LayeredNet, Result};

impl LayeredNet {
    /// Writes the net in the text format.
    pub fn write_text<W: Write>(&self, mut out: W) -> Result<()> {
        let hidden = match self.hidden_layer_count() {
            0 => 0,
            1 => self.layers()[1],
            n => {
                return Err(Error::InvalidShape(format!(
                    "text format holds one hidden layer, net has {n}"
                )));
            }
        };

        let io_err = |e: std::io::Error| Error::InvalidData(format!("failed to write net: {e}"));
        writeln!(out, "{}", self.input_width()).map_err(io_err)?;
        writeln!(out, "{hidden}").map_err(io_err)?;
        writeln!(out, "{}", self.output_width()).map_err(io_err)?;
        for w in self.weights() {
            writeln!(out, "{w}").map_err(io_err)?;
        }
        out.flush().map_err(io_err)
    }

    pub fn to_text_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_text(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::InvalidData(format!("non-utf8 output: {e}")))
    }

    /// Save the net to a text file.
    pub fn save_text<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let p = path.as_ref();
        let file = std::fs::File::create(p)
            .map_err(|e| Error::InvalidData(format!("failed to create {}: {e}", p.display())))?;
        self.write_text(std::io::BufWriter::new(file))?;
        log::debug!("saved {:?} net to {}", self.layers(), p.display());
        Ok(())
    }

    /// Parse a net from the text format.
    ///
    /// Weights at pairs without an edge are ignored, as with
    /// [`crate::NeuronGraph::set_weight`].
    pub fn from_text_str(s: &str) -> Result<Self> {
        let total_lines = s.lines().count();
        let mut lines = s.lines().enumerate();
        let mut next_line = |what: &'static str| {
            lines.next().map(|(i, l)| (i + 1, l.trim())).ok_or_else(|| {
                Error::InvalidData(format!("unexpected end of input, expected {what}"))
            })
        };

        let mut width = |what: &'static str| -> Result<usize> {
            let (line_no, line) = next_line(what)?;
            line.parse::<usize>().map_err(|e| {
                Error::InvalidData(format!("line {line_no}: invalid {what} {line:?}: {e}"))
            })
        };
        let input = width("input width")?;
        let hidden = width("hidden width")?;
        let output = width("output width")?;

        let layers: Vec<usize> = if hidden == 0 {
            vec![input, output]
        } else {
            vec![input, hidden, output]
        };

        // Size the matrix against the lines actually present before allocating it.
        let n = crate::layered::total_neurons(&layers)
            .map_err(|e| Error::InvalidData(format!("invalid layer widths: {e}")))?;
        let cells = n.checked_mul(n).ok_or_else(|| {
            Error::InvalidData(format!("{n} neurons overflow the weight matrix size"))
        })?;
        let remaining = total_lines.saturating_sub(3);
        if cells > remaining {
            return Err(Error::InvalidData(format!(
                "unexpected end of input, {n} neurons need {cells} weights but {remaining} lines remain"
            )));
        }

        let mut net = LayeredNet::from_layer_sizes(&layers)
            .map_err(|e| Error::InvalidData(format!("invalid layer widths: {e}")))?;

        for from in 0..n {
            for to in 0..n {
                let (line_no, line) = next_line("weight")?;
                let w: f32 = line.parse().map_err(|e| {
                    Error::InvalidData(format!("line {line_no}: invalid weight {line:?}: {e}"))
                })?;
                if !w.is_finite() {
                    return Err(Error::InvalidData(format!(
                        "line {line_no}: weight must be finite, got {w}"
                    )));
                }
                net.graph_mut().set_weight(from, to, w);
            }
        }

        if let Some((i, extra)) = lines.find(|(_, l)| !l.trim().is_empty()) {
            return Err(Error::InvalidData(format!(
                "line {}: unexpected trailing data {extra:?}",
                i + 1
            )));
        }

        Ok(net)
    }

    pub fn read_text<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut s = String::new();
        reader
            .read_to_string(&mut s)
            .map_err(|e| Error::InvalidData(format!("failed to read net: {e}")))?;
        Self::from_text_str(&s)
    }

    /// Load a net from a text file.
    pub fn load_text<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let s = std::fs::read_to_string(p)
            .map_err(|e| Error::InvalidData(format!("failed to read {}: {e}", p.display())))?;
        let net = Self::from_text_str(&s)?;
        log::debug!("loaded {:?} net from {}", net.layers(), p.display());
        Ok(net)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_net() -> LayeredNet {
        let mut net = LayeredNet::from_layer_sizes(&[2, 1, 1]).unwrap();
        let g = net.graph_mut();
        g.set_weight(0, 2, 0.5);
        g.set_weight(1, 2, -1.25);
        g.set_weight(2, 3, 3.0);
        net
    }

    #[test]
    fn writes_widths_then_full_matrix() {
        let text = small_net().to_text_string().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3 + 16);
        assert_eq!(&lines[..3], &["2", "1", "1"]);
        // Row 0: weight(0, 2) is the third entry.
        assert_eq!(lines[3 + 2], "0.5");
        assert_eq!(lines[3 + 4 + 2], "-1.25");
        assert_eq!(lines[3 + 8 + 3], "3");
        assert_eq!(lines[3], "0");
    }

    #[test]
    fn text_roundtrip_preserves_topology_and_weights() {
        let net = small_net();
        let loaded = LayeredNet::from_text_str(&net.to_text_string().unwrap()).unwrap();
        assert_eq!(loaded.layers(), net.layers());
        assert_eq!(loaded.weights(), net.weights());
    }

    #[test]
    fn zero_hidden_width_builds_two_layer_net() {
        let text = "2\n0\n1\n0\n0\n0.5\n0\n0\n2E-1\n0\n0\n0\n";
        let net = LayeredNet::from_text_str(text).unwrap();
        assert_eq!(net.layers(), &[2, 1]);
        assert_eq!(net.weight(0, 2), 0.5);
        assert!((net.weight(1, 2) - 0.2).abs() < 1e-7);
    }

    #[test]
    fn weights_on_non_edges_are_ignored() {
        let mut text = String::from("1\n0\n1\n");
        // weight(0, 0), weight(0, 1), weight(1, 0), weight(1, 1)
        text.push_str("9\n1.5\n9\n9\n");
        let net = LayeredNet::from_text_str(&text).unwrap();
        assert_eq!(net.weights(), &[0.0, 1.5, 0.0, 0.0]);
    }

    #[test]
    fn rejects_malformed_input() {
        let cases = [
            ("", "end of input"),
            ("x\n0\n1\n", "input width"),
            ("1\n0\n1\n0\n", "end of input"),
            ("1\n0\n1\n0\nabc\n0\n0\n", "line 5"),
            ("1\n0\n1\n0\nNaN\n0\n0\n", "finite"),
            ("1\n0\n1\n0\n1\n0\n0\n7\n", "trailing"),
            ("0\n0\n1\n0\n", "layer widths"),
            ("18446744073709551615\n0\n1\n", "layer widths"),
            ("4294967296\n0\n1\n", "overflow"),
            ("100000\n0\n1\n0\n", "need 10000200001 weights"),
        ];
        for (text, needle) in cases {
            let err = LayeredNet::from_text_str(text).unwrap_err();
            assert!(matches!(err, Error::InvalidData(_)), "{text:?}: {err}");
            let msg = format!("{err}");
            assert!(msg.contains(needle), "{text:?}: {msg}");
        }

        // Trailing blank lines are fine.
        assert!(LayeredNet::from_text_str("1\n0\n1\n0\n1\n0\n0\n\n\n").is_ok());
    }

    #[test]
    fn rejects_writing_multiple_hidden_layers() {
        let net = LayeredNet::from_layer_sizes(&[1, 2, 2, 1]).unwrap();
        let err = net.to_text_string().unwrap_err();
        assert!(matches!(err, Error::InvalidShape(_)));
    }

    #[test]
    fn file_roundtrip() {
        let net = small_net();
        let path = std::env::temp_dir().join(format!("rust_nnet_{}.txt", std::process::id()));
        net.save_text(&path).unwrap();
        let loaded = LayeredNet::load_text(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.weights(), net.weights());

        let reader = std::io::Cursor::new(net.to_text_string().unwrap());
        let again = LayeredNet::read_text(reader).unwrap();
        assert_eq!(again.layers(), net.layers());
    }
}
