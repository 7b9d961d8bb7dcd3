//! Wall clock and id generation.

use model::Timestamp;

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> Timestamp {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let now = js_sys::Date::now() as Timestamp;
        now
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| Timestamp::try_from(d.as_millis()).unwrap_or(Timestamp::MAX))
    }
}

/// Offset of local time from UTC at `ts`, in milliseconds. Zero off-browser.
pub fn local_offset_ms(ts: Timestamp) -> Timestamp {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let minutes = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(ts as f64)).get_timezone_offset() as Timestamp;
        -minutes * 60_000
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = ts;
        0
    }
}

/// Fresh client-side id.
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
