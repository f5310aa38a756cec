use crate::cli::DecompressFlags;
use crate::error::{CliError, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const GZIP_EXTENSION: &str = "gz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decompression {
    #[default]
    None,
    /// Decompress beside the input and remove the copy on release.
    Temporary,
    /// Decompress beside the input and keep the copy.
    Persistent,
}

impl From<DecompressFlags> for Decompression {
    fn from(flags: DecompressFlags) -> Self {
        if flags.unzip {
            Decompression::Temporary
        } else if flags.zcat {
            Decompression::Persistent
        } else {
            Decompression::None
        }
    }
}

/// A trajectory path ready to be read, possibly a decompressed copy of the original.
///
/// A temporary copy is removed by [`release`](PreparedInput::release), or on drop when
/// the run bails out early. Removal failures are logged and never escalated.
#[derive(Debug)]
pub struct PreparedInput {
    path: PathBuf,
    temporary: Option<PathBuf>,
}

impl PreparedInput {
    /// Inputs without a `.gz` extension are used as they are, whatever the mode. A file
    /// already sitting at the decompression target is read instead and never removed.
    pub fn acquire(path: &Path, mode: Decompression) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::InputAccess {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "not a readable file"),
            });
        }

        let is_gzip = path.extension().is_some_and(|ext| ext == GZIP_EXTENSION);
        if mode == Decompression::None || !is_gzip {
            return Ok(Self {
                path: path.to_path_buf(),
                temporary: None,
            });
        }

        let target = path.with_extension("");
        if target.exists() {
            warn!("Using existing {:?} instead of decompressing {:?}", target, path);
            return Ok(Self {
                path: target,
                temporary: None,
            });
        }
        info!("Decompressing {:?} to {:?}", path, target);
        decompress(path, &target)?;

        let temporary = (mode == Decompression::Temporary).then(|| target.clone());
        Ok(Self {
            path: target,
            temporary,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn release(mut self) {
        self.cleanup();
    }

    fn cleanup(&mut self) {
        if let Some(path) = self.temporary.take() {
            match fs::remove_file(&path) {
                Ok(()) => debug!("Removed decompressed copy {:?}", path),
                Err(e) => warn!("Could not remove decompressed copy {:?}: {}", path, e),
            }
        }
    }
}

impl Drop for PreparedInput {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn access_error(path: &Path) -> impl FnOnce(io::Error) -> CliError + use<> {
    let path = path.to_path_buf();
    move |source| CliError::InputAccess { path, source }
}

fn decompress(source: &Path, target: &Path) -> Result<()> {
    let input = File::open(source).map_err(access_error(source))?;
    let mut decoder = GzDecoder::new(BufReader::new(input));
    let output = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .map_err(access_error(target))?;
    let mut output = BufWriter::new(output);

    let copied = io::copy(&mut decoder, &mut output).and_then(|_| output.flush());
    if let Err(e) = copied {
        drop(output);
        if let Err(cleanup) = fs::remove_file(target) {
            warn!("Could not remove partial copy {:?}: {}", target, cleanup);
        }
        return Err(access_error(source)(e));
    }
    Ok(())
}
