use log::{error, info, trace};

use super::header::read_header;
use crate::bitstream::{BitSink, BitSource};
use crate::error::{HuffError, Result, Section};
use crate::huffman_coding::{BITS_PER_WORD, PSEUDO_EOF};

/// Decompress one stream from the source into the sink. Returns the number of bytes written.
///
/// Reading stops at the sentinel, so anything after it (the padding bits) is never touched.
/// On error nothing more is flushed to the sink.
pub fn decompress<R, W>(source: &mut R, sink: &mut W) -> Result<u64>
where
    R: BitSource,
    W: BitSink,
{
    let root = read_header(source)?;

    /*
    The tree is the state machine. Start at the root and take one bit per step: 0 goes left,
    1 goes right. A leaf emits its byte and sends us back to the root, except the sentinel leaf,
    which ends the stream.
    */
    let mut written = 0_u64;
    let mut node = &root;
    loop {
        let bit = match source.read_bits(1)? {
            Some(bit) => bit,
            None => {
                error!(
                    "Fatal error: the stream ended after {} bytes without an end-of-stream code.",
                    written
                );
                return Err(HuffError::truncated(Section::Payload));
            }
        };
        node = node
            .child(bit)
            .ok_or_else(|| HuffError::BadTree("walked off a leaf".to_string()))?;

        if let Some(sym) = node.symbol() {
            if sym == PSEUDO_EOF {
                break;
            }
            trace!("{:>8}: {:>3}", written, sym);
            sink.write_bits(BITS_PER_WORD, sym as u32)?;
            written += 1;
            node = &root;
        }
    }
    sink.flush()?;

    info!("Decompressed {} bytes.", written);
    Ok(written)
}
