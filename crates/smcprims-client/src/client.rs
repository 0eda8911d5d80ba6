use std::sync::Arc;

use smcprims_frame::{
    command_name, decode_key_data, encode_key_data, FourCharCode, KeyData, KeyInfo, SmcValue,
    DATA_CAPACITY, GET_KEY_FROM_INDEX, READ_KEY, READ_KEY_INFO, WRITE_KEY,
};
use smcprims_transport::{SmcConnection, SmcTransport};
use tracing::{debug, warn};

use crate::cache::KeyInfoCache;
use crate::config::ClientConfig;
use crate::error::{Result, SmcError};

/// Key operations against one controller handle.
///
/// Every operation is a short synchronous sequence of transport calls. A
/// client can be shared between threads when its transport can; clients that
/// share a handle can also share one [`KeyInfoCache`] via [`with_cache`].
///
/// [`with_cache`]: SmcClient::with_cache
pub struct SmcClient<T> {
    transport: T,
    cache: Arc<KeyInfoCache>,
    config: ClientConfig,
}

impl SmcClient<SmcConnection> {
    /// Open the `AppleSMC` service and wrap it in a client with a private cache.
    pub fn open() -> Result<Self> {
        Ok(Self::new(SmcConnection::open()?))
    }
}

impl<T: SmcTransport> SmcClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: Arc::new(KeyInfoCache::new()),
            config: ClientConfig::default(),
        }
    }

    /// Use a shared key-info cache.
    pub fn with_cache(mut self, cache: Arc<KeyInfoCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cache(&self) -> &Arc<KeyInfoCache> {
        &self.cache
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Declared size, type and attributes of `key`.
    ///
    /// A cached entry is returned as a success without contacting the
    /// controller: a key's schema is assumed not to change while the process
    /// runs. Failed lookups are never cached.
    pub fn key_info(&self, key: FourCharCode) -> Result<KeyInfo> {
        if self.config.cache_key_info {
            if let Some(info) = self.cache.get(key) {
                return Ok(info);
            }
        }

        let response = self.exchange(KeyData::request(key, READ_KEY_INFO))?;
        let info = response.key_info;
        if self.config.cache_key_info {
            Ok(self.cache.insert_if_absent(key, info))
        } else {
            Ok(info)
        }
    }

    /// Read the current value of `key`.
    pub fn read_key(&self, key: FourCharCode) -> Result<SmcValue> {
        let mut value = SmcValue::empty(key);
        self.read_key_into(key, &mut value)?;
        Ok(value)
    }

    /// Parse `text` as a key and read it.
    pub fn read_key_text(&self, text: &str) -> Result<SmcValue> {
        self.read_key(text.parse()?)
    }

    /// Read `key` into `value`.
    ///
    /// On failure `value` still describes how far the read got: the key is
    /// always set, size and type are set once the key info is known, and the
    /// data bytes stay zeroed.
    pub fn read_key_into(&self, key: FourCharCode, value: &mut SmcValue) -> Result<()> {
        *value = SmcValue::empty(key);

        let info = self.key_info(key)?;
        value.data_size = info.data_size.min(DATA_CAPACITY as u32);
        value.data_type = info.data_type;

        let mut request = KeyData::request(key, READ_KEY);
        request.key_info.data_size = info.data_size;
        let response = self.exchange(request)?;

        value.bytes = response.bytes;
        Ok(())
    }

    /// Write `value` to its key.
    ///
    /// The write is only sent when the value's size and type match the key's
    /// declared metadata exactly.
    pub fn write_key(&self, value: &SmcValue) -> Result<()> {
        let info = self.key_info(value.key)?;

        if info.data_size != value.data_size || info.data_type != value.data_type {
            warn!(
                key = %value.key,
                expected_size = info.data_size,
                expected_type = %info.data_type,
                actual_size = value.data_size,
                actual_type = %value.data_type,
                "refusing write with mismatched size or type"
            );
            return Err(SmcError::TypeMismatch {
                key: value.key,
                expected_size: info.data_size,
                expected_type: info.data_type,
                actual_size: value.data_size,
                actual_type: value.data_type,
            });
        }

        let mut request = KeyData::request(value.key, WRITE_KEY);
        request.key_info.data_size = value.data_size;
        request.bytes = value.bytes;
        self.exchange(request)?;
        Ok(())
    }

    /// The key stored at `index` in the controller's key table.
    pub fn key_at_index(&self, index: u32) -> Result<FourCharCode> {
        let mut request = KeyData::request(FourCharCode::ZERO, GET_KEY_FROM_INDEX);
        request.data32 = index;
        Ok(self.exchange(request)?.key)
    }

    fn exchange(&self, request: KeyData) -> Result<KeyData> {
        debug!(
            key = %request.key,
            command = command_name(request.data8),
            "controller call"
        );
        let raw = self
            .transport
            .call(self.config.kernel_index, &encode_key_data(&request))?;
        let response = decode_key_data(&raw);

        if !response.result.is_success() {
            debug!(key = %request.key, status = %response.result, "controller rejected call");
            return Err(SmcError::Protocol {
                key: request.key,
                command: request.data8,
                status: response.result,
            });
        }
        Ok(response)
    }
}

impl<T> std::fmt::Debug for SmcClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmcClient")
            .field("config", &self.config)
            .field("cached_keys", &self.cache.len())
            .finish()
    }
}
