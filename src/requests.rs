use anyhow::bail;
use reqwest::{Client, ClientBuilder};

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = ClientBuilder::new().build()?;
        Ok(Self { client })
    }

    /// Fetches the schedule page body. A non-success status aborts the whole
    /// run; there is nothing useful to render without the page.
    pub async fn fetch_page(&self, url: &str) -> anyhow::Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            bail!("Failed to download {url}. Status code: {status}");
        }
        let body = response.text().await?;
        Ok(body)
    }
}
