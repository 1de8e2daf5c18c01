use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportHoldingsResult {
    pub imported: usize,
}
