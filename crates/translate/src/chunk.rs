//! Splitting long texts into request-sized pieces.

/// Longest piece sent in one request.
pub const MAX_CHUNK_CHARS: usize = 4500;

/// One request-sized piece of a longer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    /// Starts mid-line: the previous chunk ended where an over-long line was cut.
    pub continues_line: bool,
}

/// Splits `text` into pieces of at most `max_chars` characters on line boundaries.
///
/// A single line longer than `max_chars` is cut on char boundaries; the pieces after the cut are
/// marked [`Chunk::continues_line`] so [`join_chunks`] glues them back without a newline.
pub fn chunk_lines(text: &str, max_chars: usize) -> Vec<Chunk> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current: Option<(Chunk, usize)> = None;

    for line in text.split('\n') {
        for (i, piece) in split_long_line(line, max_chars).into_iter().enumerate() {
            let continues_line = i > 0;
            let sep = usize::from(!continues_line);
            let piece_len = piece.chars().count();
            current = match current.take() {
                Some((mut chunk, len)) if len + sep + piece_len <= max_chars => {
                    if !continues_line {
                        chunk.text.push('\n');
                    }
                    chunk.text.push_str(&piece);
                    Some((chunk, len + sep + piece_len))
                }
                prev => {
                    if let Some((chunk, _)) = prev {
                        chunks.push(chunk);
                    }
                    Some((
                        Chunk {
                            text: piece,
                            continues_line,
                        },
                        piece_len,
                    ))
                }
            };
        }
    }
    if let Some((chunk, _)) = current {
        chunks.push(chunk);
    }
    chunks
}

/// Reassembles per-chunk outputs in chunk order: a newline between chunks, none across a cut line.
pub fn join_chunks<S: AsRef<str>>(chunks: &[Chunk], outputs: &[S]) -> String {
    let mut joined = String::new();
    for (i, (chunk, out)) in chunks.iter().zip(outputs).enumerate() {
        if i > 0 && !chunk.continues_line {
            joined.push('\n');
        }
        joined.push_str(out.as_ref());
    }
    joined
}

fn split_long_line(line: &str, max_chars: usize) -> Vec<String> {
    if line.chars().count() <= max_chars {
        return vec![line.to_string()];
    }
    let chars: Vec<char> = line.chars().collect();
    chars.chunks(max_chars).map(|c| c.iter().collect()).collect()
}
