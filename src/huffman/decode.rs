use core::iter::FusedIterator;

use crate::{
    compressor::{HuffmanError, Result},
    huffman::{Code, node::Node},
};

if_tracing! {
    use tracing::{debug, warn};
}

/// Streaming decoder: walks the tree one bit at a time and yields a symbol every time a
/// leaf is reached, restarting from the root afterwards.
///
/// Yields `Err` once and then stops if the bits do not spell out whole code words.
#[derive(Debug)]
pub struct Decoder<'c, I> {
    root: Option<&'c Node>,
    bits: I,
    consumed: usize,
    finished: bool,
}

impl<'c, I> Decoder<'c, I>
where
    I: Iterator<Item = bool>,
{
    pub fn new(code: &'c Code, bits: I) -> Self {
        Self {
            root: code.root(),
            bits,
            consumed: 0,
            finished: false,
        }
    }

    fn next_bit(&mut self) -> Option<bool> {
        let bit = self.bits.next()?;
        self.consumed += 1;
        Some(bit)
    }

    fn fail(&mut self, err: HuffmanError) -> Option<Result<u8>> {
        self.finished = true;
        if_tracing! {{
            warn!(target = "huffman", consumed = self.consumed, error = %err, "decode failed");
        }}
        Some(Err(err))
    }
}

impl<I> Iterator for Decoder<'_, I>
where
    I: Iterator<Item = bool>,
{
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Result<u8>> {
        if self.finished {
            return None;
        }

        let Some(root) = self.root else {
            self.finished = true;
            return match self.next_bit() {
                Some(_) => self.fail(HuffmanError::EmptyInput("decode")),
                None => None,
            };
        };

        // a lone leaf owns the empty code word; each occurrence is sent as one `0` bit
        if let Node::Leaf { symbol, .. } = root {
            return match self.next_bit() {
                Some(false) => Some(Ok(*symbol)),
                Some(true) => {
                    let at = self.consumed;
                    self.fail(HuffmanError::Decode(format!(
                        "bit {} is 1, but a single-symbol code only uses 0 bits",
                        at
                    )))
                }
                None => {
                    self.finished = true;
                    None
                }
            };
        }

        let mut node = root;
        let mut depth = 0usize;
        loop {
            let Some(bit) = self.next_bit() else {
                if depth == 0 {
                    self.finished = true;
                    return None;
                }
                return self.fail(HuffmanError::Decode(format!(
                    "bit stream ended {} bits into a code word",
                    depth
                )));
            };
            depth += 1;

            match node.child(bit) {
                Some(Node::Leaf { symbol, .. }) => return Some(Ok(*symbol)),
                Some(next) => node = next,
                None => {
                    let at = self.consumed;
                    return self.fail(HuffmanError::Decode(format!(
                        "bit {} leads to a branch the code does not define",
                        at
                    )));
                }
            }
        }
    }
}

impl<I> FusedIterator for Decoder<'_, I> where I: Iterator<Item = bool> {}

impl Code {
    /// Lazily decodes `bits`, see [`Decoder`].
    pub fn decoder<I>(&self, bits: I) -> Decoder<'_, I::IntoIter>
    where
        I: IntoIterator<Item = bool>,
    {
        Decoder::new(self, bits.into_iter())
    }

    /// Decodes a whole bit stream.
    ///
    /// # Errors
    ///
    /// [`HuffmanError::Decode`] when the stream stops inside a code word or follows a
    /// branch that does not exist, [`HuffmanError::EmptyInput`] when the code is empty
    /// but the stream is not.
    pub fn decode<I>(&self, bits: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = bool>,
    {
        let out = self.decoder(bits).collect::<Result<Vec<u8>>>()?;
        if_tracing! {{
            debug!(target = "huffman", symbols = out.len(), "decode complete");
        }}
        Ok(out)
    }
}
