//! Google Sheets queue client.

use crate::{ServiceAccountKey, SheetRow, SheetStore, SheetTable, TokenProvider, column_letter};
use async_trait::async_trait;
use mason_error::{SheetError, SheetErrorKind, SheetResult};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// Column span fetched per pass; the queue's columns all fit inside it.
const FETCH_RANGE: &str = "A1:Z";

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// [`SheetStore`] backed by the Google Sheets and Drive APIs.
///
/// The spreadsheet is addressed by display title, matching how the queue
/// sheet is shared with the service account; the id behind the title is
/// resolved once and cached for the life of the process.
pub struct GoogleSheetsClient {
    title: String,
    tokens: TokenProvider,
    http: reqwest::Client,
    spreadsheet_id: Mutex<Option<String>>,
}

impl GoogleSheetsClient {
    /// Build a client from a credential blob and a spreadsheet title.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when the blob or its private key fails
    /// to parse; callers treat this as fatal at startup.
    pub fn new(creds_json: &str, title: impl Into<String>) -> SheetResult<Self> {
        let key = ServiceAccountKey::from_json(creds_json)?;
        let http = reqwest::Client::new();
        let tokens = TokenProvider::new(key, http.clone())?;
        Ok(Self {
            title: title.into(),
            tokens,
            http,
            spreadsheet_id: Mutex::new(None),
        })
    }

    /// Resolve the spreadsheet id behind the configured title, caching the
    /// answer. Title collisions resolve to the first Drive match.
    #[instrument(skip(self), fields(title = %self.title))]
    async fn spreadsheet_id(&self) -> SheetResult<String> {
        let mut cached = self.spreadsheet_id.lock().await;
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }

        let token = self.tokens.bearer_token().await?;
        let query = format!(
            "name = '{}' and mimeType = 'application/vnd.google-apps.spreadsheet'",
            self.title.replace('\'', "\\'")
        );
        let response = self
            .http
            .get(DRIVE_FILES_URL)
            .bearer_auth(&token)
            .query(&[("q", query.as_str()), ("fields", "files(id)"), ("pageSize", "10")])
            .send()
            .await
            .map_err(|e| SheetError::new(SheetErrorKind::ApiError(e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetError::new(SheetErrorKind::ApiError(format!(
                "Drive lookup failed with {status}: {body}"
            ))));
        }

        let listing: DriveFileList = response
            .json()
            .await
            .map_err(|e| SheetError::new(SheetErrorKind::MalformedResponse(e.to_string())))?;

        let id = listing
            .files
            .first()
            .map(|f| f.id.clone())
            .ok_or_else(|| SheetError::new(SheetErrorKind::SpreadsheetNotFound(self.title.clone())))?;

        info!(spreadsheet_id = %id, "Resolved queue spreadsheet");
        *cached = Some(id.clone());
        Ok(id)
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsClient {
    #[instrument(skip(self))]
    async fn fetch_rows(&self) -> SheetResult<SheetTable> {
        let id = self.spreadsheet_id().await?;
        let token = self.tokens.bearer_token().await?;
        let url = format!("{SHEETS_API_BASE}/{id}/values/{FETCH_RANGE}");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| SheetError::new(SheetErrorKind::ApiError(e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetError::new(SheetErrorKind::ApiError(format!(
                "values fetch failed with {status}: {body}"
            ))));
        }

        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetError::new(SheetErrorKind::MalformedResponse(e.to_string())))?;

        let mut values = range.values.into_iter();
        let headers = values.next().unwrap_or_default();

        // Data begins at sheet row 2; short rows leave their trailing cells absent.
        let rows = values
            .enumerate()
            .map(|(offset, cells)| SheetRow {
                index: offset + 2,
                cells: headers
                    .iter()
                    .zip(cells)
                    .map(|(header, value)| (header.clone(), value))
                    .collect(),
            })
            .collect::<Vec<_>>();

        debug!(rows = rows.len(), "Fetched queue rows");
        Ok(SheetTable { headers, rows })
    }

    #[instrument(skip(self, value))]
    async fn write_cell(&self, row: usize, column: usize, value: &str) -> SheetResult<()> {
        let id = self.spreadsheet_id().await?;
        let token = self.tokens.bearer_token().await?;
        let cell = format!("{}{}", column_letter(column), row);
        let url = format!("{SHEETS_API_BASE}/{id}/values/{cell}?valueInputOption=RAW");

        let body = json!({
            "range": cell,
            "majorDimension": "ROWS",
            "values": [[value]],
        });

        let response = self
            .http
            .put(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SheetError::new(SheetErrorKind::ApiError(e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetError::new(SheetErrorKind::ApiError(format!(
                "cell update failed with {status}: {body}"
            ))));
        }

        debug!(cell = %cell, "Wrote status cell");
        Ok(())
    }
}

impl std::fmt::Debug for GoogleSheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsClient")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}
