use std::fs::{self, File, OpenOptions};
use std::io::{self, Cursor, Read, Write};
use std::path::Path;

use log::{info, warn};

use super::cli::{HuffOpts, Mode, Output};
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::bitstream::RewindableSource;
use crate::compression::compress::compress_with_header;
use crate::compression::decompress::decompress;
use crate::error::Result;

/// Suffix given to compressed files.
pub const SUFFIX: &str = ".hf";
/// Suffix given to decompressed files whose name did not end in SUFFIX.
pub const OUT_SUFFIX: &str = ".out";

/// Name of the file a mode writes for this input. Test mode writes no file.
pub fn output_name(input: &str, mode: Mode) -> Option<String> {
    match mode {
        Mode::Zip => Some(format!("{}{}", input, SUFFIX)),
        Mode::Unzip => Some(match input.strip_suffix(SUFFIX) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => format!("{}{}", input, OUT_SUFFIX),
        }),
        Mode::Test => None,
    }
}

/// Open the output file, refusing to clobber an existing one unless forced.
fn create_output(name: &str, force: bool) -> io::Result<File> {
    if force {
        File::create(name)
    } else {
        OpenOptions::new().write(true).create_new(true).open(name).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists. Use -f to overwrite it.", name),
                )
            } else {
                e
            }
        })
    }
}

/// Run one operation from a source into a writer. Returns the count of uncompressed bytes:
/// read when compressing, written otherwise.
fn run<R, W>(opts: &HuffOpts, source: &mut R, writer: W) -> Result<u64>
where
    R: RewindableSource,
    W: Write,
{
    let mut bw = BitWriter::new(writer);
    match opts.op_mode {
        Mode::Zip => Ok(compress_with_header(source, &mut bw, opts.header)?.bytes_in),
        Mode::Unzip | Mode::Test => decompress(source, &mut bw),
    }
}

/// Compress, decompress or test one named file as the options say.
///
/// A failed operation removes whatever part of its output file was written. The input is
/// removed only after success, and only when writing to a file without -k. An empty input
/// compresses to an empty file that can't be decompressed, so it is always kept.
pub fn process_file(opts: &HuffOpts, input: &str) -> Result<()> {
    info!("{}: {} starting", input, opts.op_mode);
    let mut source = BitReader::new(File::open(input)?);

    let target = match (opts.op_mode, opts.output) {
        (Mode::Test, _) => {
            run(opts, &mut source, io::sink())?;
            info!("{}: ok", input);
            return Ok(());
        }
        (_, Output::Stdout) => {
            run(opts, &mut source, io::stdout().lock())?;
            return Ok(());
        }
        (mode, Output::File) => output_name(input, mode).unwrap_or_default(),
    };

    let file = create_output(&target, opts.force_overwrite)?;
    let bytes = match run(opts, &mut source, file) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("{}: removing incomplete output {}", input, target);
            if let Err(cleanup) = fs::remove_file(&target) {
                warn!("{}: could not remove {}: {}", input, target, cleanup);
            }
            return Err(e);
        }
    };
    info!("{}: wrote {}", input, target);

    if opts.op_mode == Mode::Zip && bytes == 0 {
        warn!("{}: input is empty, keeping it", input);
        return Ok(());
    }
    if !opts.keep_input_files && Path::new(input).exists() {
        fs::remove_file(input)?;
        info!("{}: removed", input);
    }
    Ok(())
}

/// Process standard input. It is read into memory in full because compression needs two passes.
pub fn process_stdin(opts: &HuffOpts) -> Result<()> {
    let mut data = vec![];
    io::stdin().lock().read_to_end(&mut data)?;
    info!("Read {} bytes from stdin", data.len());

    let mut source = BitReader::new(Cursor::new(data));
    match opts.op_mode {
        Mode::Test => run(opts, &mut source, io::sink())?,
        _ => run(opts, &mut source, io::stdout().lock())?,
    };
    Ok(())
}

#[cfg(test)]
mod test {
    use std::fs;
    use std::path::PathBuf;

    use super::{output_name, process_file};
    use crate::error::HuffError;
    use crate::tools::cli::{HuffOpts, Mode};

    /// A scratch file name unique to this test run.
    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("huffpress-{}-{}", std::process::id(), name))
    }

    fn opts(mode: Mode) -> HuffOpts {
        let mut opts = HuffOpts::new();
        opts.op_mode = mode;
        opts
    }

    #[test]
    fn output_name_test() {
        assert_eq!(output_name("a.txt", Mode::Zip).unwrap(), "a.txt.hf");
        assert_eq!(output_name("a.txt.hf", Mode::Unzip).unwrap(), "a.txt");
        assert_eq!(output_name("a.bin", Mode::Unzip).unwrap(), "a.bin.out");
        assert_eq!(output_name(".hf", Mode::Unzip).unwrap(), ".hf.out");
        assert_eq!(output_name("a.hf", Mode::Test), None);
    }

    #[test]
    fn file_round_trip_test() {
        let input = scratch("trip.txt");
        let input_name = input.to_str().unwrap().to_string();
        let packed = format!("{}.hf", input_name);
        let data = b"she sells sea shells by the sea shore".repeat(30);
        fs::write(&input, &data).unwrap();

        process_file(&opts(Mode::Zip), &input_name).unwrap();
        assert!(!input.exists());
        assert!(fs::metadata(&packed).unwrap().len() < data.len() as u64);

        process_file(&opts(Mode::Test), &packed).unwrap();

        let mut unzip = opts(Mode::Unzip);
        unzip.keep_input_files = true;
        process_file(&unzip, &packed).unwrap();
        assert_eq!(fs::read(&input).unwrap(), data);
        assert!(PathBuf::from(&packed).exists());

        fs::remove_file(&input).unwrap();
        fs::remove_file(&packed).unwrap();
    }

    #[test]
    fn no_overwrite_test() {
        let input = scratch("clobber.txt");
        let input_name = input.to_str().unwrap().to_string();
        let packed = format!("{}.hf", input_name);
        fs::write(&input, b"abacabad").unwrap();
        fs::write(&packed, b"precious").unwrap();

        let result = process_file(&opts(Mode::Zip), &input_name);
        assert!(matches!(result, Err(HuffError::Io(_))));
        assert_eq!(fs::read(&packed).unwrap(), b"precious");
        assert!(input.exists());

        let mut forced = opts(Mode::Zip);
        forced.force_overwrite = true;
        forced.keep_input_files = true;
        process_file(&forced, &input_name).unwrap();
        assert_ne!(fs::read(&packed).unwrap(), b"precious");

        fs::remove_file(&input).unwrap();
        fs::remove_file(&packed).unwrap();
    }

    #[test]
    fn bad_input_cleanup_test() {
        let input = scratch("junk.hf");
        let input_name = input.to_str().unwrap().to_string();
        fs::write(&input, b"not a compressed file").unwrap();

        let result = process_file(&opts(Mode::Unzip), &input_name);
        assert!(matches!(result, Err(HuffError::BadMagic { .. })));
        // The partial output is gone and the input is untouched
        assert!(!scratch("junk").exists());
        assert!(input.exists());

        fs::remove_file(&input).unwrap();
    }

    #[test]
    fn empty_input_kept_test() {
        let input = scratch("empty.txt");
        let input_name = input.to_str().unwrap().to_string();
        let packed = format!("{}.hf", input_name);
        fs::write(&input, b"").unwrap();

        process_file(&opts(Mode::Zip), &input_name).unwrap();
        assert!(input.exists());
        assert_eq!(fs::metadata(&packed).unwrap().len(), 0);

        // The empty output doesn't decompress, so the input is all the user has
        let result = process_file(&opts(Mode::Test), &packed);
        assert!(matches!(result, Err(HuffError::Truncated { .. })));
        assert_eq!(fs::read(&input).unwrap(), b"");

        fs::remove_file(&input).unwrap();
        fs::remove_file(&packed).unwrap();
    }
}
