use bytes::Bytes;

use crate::chunk::{chunk_channel, ChunkReader};
use crate::codec::{
    decode_ascii, decode_utf16, CODE_LEN, PROCESS_TRAILER, SIGNATURE, SPOT_TRAILER, VERSION,
};
use crate::config::CodecConfig;
use crate::convert::to_components;
use crate::error::{DecodeError, FormatError, Result, Step};
use crate::types::{Color, ColorBook, ColorSpace};

/// Sequential ACB decoder driven by exact-length reads.
///
/// Each field's shape depends on earlier fields (string lengths, color
/// space, color count), so steps run strictly one after another. The only
/// suspension point is [`ChunkReader::read`].
pub struct AcbDecoder {
    reader: ChunkReader,
    config: CodecConfig,
    step: Step,
}

impl AcbDecoder {
    /// Create a decoder with default configuration.
    pub fn new(reader: ChunkReader) -> Self {
        Self::with_config(reader, CodecConfig::default())
    }

    /// Create a decoder with explicit configuration.
    pub fn with_config(reader: ChunkReader, config: CodecConfig) -> Self {
        Self {
            reader,
            config,
            step: Step::Signature,
        }
    }

    /// The step currently being decoded.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Decode one complete book.
    ///
    /// Fails with exactly one error on the first violation; no partial book
    /// is ever returned.
    pub async fn decode(mut self) -> Result<ColorBook> {
        self.step = Step::Signature;
        let signature: [u8; 4] = self.read_array().await?;
        if signature != SIGNATURE {
            return Err(self.format_error(FormatError::InvalidSignature(signature)));
        }

        self.step = Step::Version;
        let version = self.read_u16().await?;
        if version != VERSION {
            return Err(self.format_error(FormatError::UnsupportedVersion(version)));
        }

        self.step = Step::Id;
        let id = self.read_u16().await?;
        self.step = Step::Title;
        let title = self.read_string().await?;
        self.step = Step::ColorNamePrefix;
        let color_name_prefix = self.read_string().await?;
        self.step = Step::ColorNameSuffix;
        let color_name_suffix = self.read_string().await?;
        self.step = Step::Description;
        let description = self.read_string().await?;
        self.step = Step::ColorCount;
        let color_count = self.read_u16().await?;
        self.step = Step::PageSize;
        let page_size = self.read_u16().await?;
        self.step = Step::PageMidPoint;
        let page_mid_point = self.read_u16().await?;

        self.step = Step::ColorSpaceId;
        let color_space_id = self.read_u16().await?;
        let Some(color_space) = ColorSpace::from_id(color_space_id) else {
            return Err(self.format_error(FormatError::UnknownColorSpace(color_space_id)));
        };

        tracing::debug!(
            id,
            title = %title,
            color_count,
            color_space = %color_space,
            "decoded ACB header"
        );

        let mut colors = Vec::with_capacity(usize::from(color_count));
        for index in 0..color_count {
            self.step = Step::ColorRecord { index };
            colors.push(self.read_color(color_space).await?);
        }

        self.step = Step::Trailer;
        let trailer: [u8; 8] = self.read_array().await?;
        let is_spot = trailer == SPOT_TRAILER;
        if !is_spot && trailer != PROCESS_TRAILER {
            tracing::warn!(
                trailer = %decode_ascii(&trailer),
                "unrecognized trailer, treating book as process colors"
            );
        }

        tracing::debug!(id, colors = colors.len(), is_spot, "decoded ACB book");

        Ok(ColorBook {
            id,
            title,
            color_name_prefix,
            color_name_suffix,
            description,
            page_size,
            page_mid_point,
            color_space,
            colors,
            is_spot,
        })
    }

    async fn read_color(&mut self, color_space: ColorSpace) -> Result<Color> {
        let name = self.read_string().await?;
        let code = decode_ascii(&self.read_exact(CODE_LEN).await?);
        let raw = self.read_exact(color_space.component_count()).await?;
        let components = to_components(color_space, &raw);

        tracing::trace!(
            step = %self.step,
            name = %name,
            code = %code,
            ?components,
            "decoded color"
        );

        Ok(Color {
            name,
            code,
            components,
        })
    }

    async fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32().await?;
        if len == 0 {
            return Ok(String::new());
        }

        let max = self.config.max_string_len;
        let byte_len = usize::try_from(len)
            .ok()
            .and_then(|units| units.checked_mul(2))
            .filter(|_| len <= max);
        let Some(byte_len) = byte_len else {
            return Err(self.format_error(FormatError::StringTooLong { len, max }));
        };

        let payload = self.read_exact(byte_len).await?;
        Ok(decode_utf16(&payload))
    }

    async fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array().await?))
    }

    async fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array().await?))
    }

    async fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_exact(N).await?;
        let mut out = [0u8; N];
        out.copy_from_slice(&bytes);
        Ok(out)
    }

    async fn read_exact(&mut self, len: usize) -> Result<Bytes> {
        let step = self.step;
        self.reader.read(len).await.map_err(|truncated| {
            tracing::debug!(
                step = %step,
                requested = truncated.requested,
                buffered = truncated.buffered,
                "input ended mid-field"
            );
            DecodeError::Truncated { step }
        })
    }

    fn format_error(&self, source: FormatError) -> DecodeError {
        DecodeError::Format {
            step: self.step,
            source,
        }
    }
}

/// Decode one book from a chunk reader with default configuration.
pub async fn decode_book(reader: ChunkReader) -> Result<ColorBook> {
    AcbDecoder::new(reader).decode().await
}

/// Decode one book from an in-memory buffer.
pub async fn decode_bytes(data: impl AsRef<[u8]>) -> Result<ColorBook> {
    let (mut sink, reader) = chunk_channel();
    sink.feed(data.as_ref());
    sink.close();
    decode_book(reader).await
}
