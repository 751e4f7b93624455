use serde::{Deserialize, Serialize};

/// One entry of `remote.json`: a version known upstream but not fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteStubV1 {
    pub id: String,

    #[serde(default)]
    pub order: i64,

    /// Upstream update time, RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_and_time_are_optional() {
        let stubs: Vec<RemoteStubV1> = serde_json::from_str(
            r#"[{"id": "1.7.10", "order": -2, "time": "2014-06-01T00:00:00+00:00"}, {"id": "1.8"}]"#,
        )
        .expect("parse");
        assert_eq!(stubs[0].order, -2);
        assert_eq!(stubs[1].order, 0);
        assert_eq!(stubs[1].time, None);
    }
}
