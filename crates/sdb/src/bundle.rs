//! The bundle pipeline: record list ↔ document buffer ↔ printable text,
//! with an optional caller-supplied transform stage spliced in between.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sdb_base85::{from_base85, to_base85, START_DELIMITER};

use crate::codec::{DocumentDecoder, DocumentEncoder};
use crate::descriptor::ServiceRecord;
use crate::error::{SdbError, StageError};

/// Boxed future used by deferred transform stages.
pub type BoxFuture<'a, T> = futures::future::BoxFuture<'a, T>;

/// Result of a transform stage: either an immediate buffer or a deferred
/// one. The pipeline decides how to proceed by inspecting this value, not
/// by any declared stage type, and suspends only in the deferred case.
pub enum StageOutcome {
    Ready(Result<Vec<u8>, StageError>),
    Deferred(BoxFuture<'static, Result<Vec<u8>, StageError>>),
}

impl StageOutcome {
    /// An immediately available buffer.
    pub fn ready(bin: Vec<u8>) -> Self {
        Self::Ready(Ok(bin))
    }

    /// An immediate stage failure.
    pub fn fail(err: impl Into<StageError>) -> Self {
        Self::Ready(Err(err.into()))
    }

    /// A buffer that becomes available once `future` resolves.
    pub fn deferred<F>(future: F) -> Self
    where
        F: std::future::Future<Output = Result<Vec<u8>, StageError>> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }
}

/// A buffer-to-buffer processing stage (compression, encryption, ...)
/// invoked once per encode call (forward direction) and once per decode
/// call (inverse direction).
///
/// Stages are caller-owned: no cancellation or timeout is applied, and a
/// deferred outcome that never resolves stalls its operation indefinitely.
/// Any closure `Fn(Vec<u8>) -> StageOutcome` is a stage.
pub trait TransformStage {
    fn apply(&self, bin: Vec<u8>) -> StageOutcome;
}

impl<F> TransformStage for F
where
    F: Fn(Vec<u8>) -> StageOutcome,
{
    fn apply(&self, bin: Vec<u8>) -> StageOutcome {
        self(bin)
    }
}

/// Text projection applied to the document buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Base85,
    Base64,
    /// Buffer-only use: encode returns no text.
    None,
}

/// Decode input: a record list, a raw document buffer, or printable text.
pub enum BundleInput {
    Records(Vec<ServiceRecord>),
    Bin(Vec<u8>),
    Text(String),
}

impl From<Vec<ServiceRecord>> for BundleInput {
    fn from(records: Vec<ServiceRecord>) -> Self {
        Self::Records(records)
    }
}

impl From<Vec<u8>> for BundleInput {
    fn from(bin: Vec<u8>) -> Self {
        Self::Bin(bin)
    }
}

impl From<String> for BundleInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for BundleInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// A services descriptor bundle: owns at most one record list and one
/// document buffer at a time; every encode/decode call replaces both.
///
/// A bundle is driven by one logical caller at a time: there is no
/// internal locking, and the per-pass history tables live entirely inside
/// each call.
#[derive(Debug, Default)]
pub struct ServiceBundle {
    records: Option<Vec<ServiceRecord>>,
    bin: Option<Vec<u8>>,
}

impl ServiceBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current record list, if any.
    pub fn records(&self) -> Option<&[ServiceRecord]> {
        self.records.as_deref()
    }

    /// The current document buffer, if any.
    pub fn bin(&self) -> Option<&[u8]> {
        self.bin.as_deref()
    }

    /// Replaces the record list without encoding.
    pub fn set_records(&mut self, records: Vec<ServiceRecord>) {
        self.records = Some(records);
    }

    /// Encodes the current record list.
    ///
    /// The document buffer is rebuilt and stored on the bundle, the
    /// optional `stage` is applied to a copy of it, and the requested text
    /// projection of the (possibly transformed) buffer is returned, with
    /// `Ok(None)` for [`TextEncoding::None`]. Fails with
    /// [`SdbError::NoData`] when no record list is set.
    pub async fn encode(
        &mut self,
        encoding: TextEncoding,
        stage: Option<&dyn TransformStage>,
    ) -> Result<Option<String>, SdbError> {
        let records = self.records.as_ref().ok_or(SdbError::NoData)?;
        let bin = DocumentEncoder::new().encode(records)?;
        self.bin = Some(bin.clone());
        let bin = match stage {
            Some(stage) => apply_stage(stage, bin).await?,
            None => bin,
        };
        Ok(match encoding {
            TextEncoding::Base85 => Some(to_base85(&bin, true)),
            TextEncoding::Base64 => Some(BASE64.encode(&bin)),
            TextEncoding::None => None,
        })
    }

    /// Decodes `input` and adopts the resulting record list and buffer.
    ///
    /// Text input is auto-detected as Base85 (by the `<~` delimiter or a
    /// [`TextEncoding::Base85`] hint) and otherwise treated as Base64. The
    /// optional `stage` runs on the raw buffer before document decoding.
    /// A record-list input is adopted directly: the buffer is recomputed
    /// from it and the stage is still invoked on that buffer for pipeline
    /// symmetry (its output is discarded).
    pub async fn decode(
        &mut self,
        input: impl Into<BundleInput>,
        hint: Option<TextEncoding>,
        stage: Option<&dyn TransformStage>,
    ) -> Result<&[ServiceRecord], SdbError> {
        match input.into() {
            BundleInput::Records(records) => {
                self.records = Some(records);
                self.encode(TextEncoding::None, None).await?;
                if let Some(stage) = stage {
                    let bin = self.bin.clone().unwrap_or_default();
                    apply_stage(stage, bin).await?;
                }
                Ok(self.records.as_deref().unwrap_or(&[]))
            }
            BundleInput::Bin(bin) => self.decode_bin(bin, stage).await,
            BundleInput::Text(text) => {
                let text = text.trim();
                let bin = if text.contains(START_DELIMITER) || hint == Some(TextEncoding::Base85)
                {
                    from_base85(text)?
                } else {
                    BASE64.decode(text)?
                };
                self.decode_bin(bin, stage).await
            }
        }
    }

    async fn decode_bin(
        &mut self,
        bin: Vec<u8>,
        stage: Option<&dyn TransformStage>,
    ) -> Result<&[ServiceRecord], SdbError> {
        let bin = match stage {
            Some(stage) => apply_stage(stage, bin).await?,
            None => bin,
        };
        let records = DocumentDecoder::new().decode(&bin)?;
        self.bin = Some(bin);
        self.records = Some(records);
        Ok(self.records.as_deref().unwrap_or(&[]))
    }
}

/// Runs a transform stage, awaiting its result only when it is deferred.
async fn apply_stage(stage: &dyn TransformStage, bin: Vec<u8>) -> Result<Vec<u8>, SdbError> {
    match stage.apply(bin) {
        StageOutcome::Ready(result) => result.map_err(SdbError::Stage),
        StageOutcome::Deferred(future) => future.await.map_err(SdbError::Stage),
    }
}
