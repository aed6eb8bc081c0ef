use std::path::{Path, PathBuf};

use gtc_session::{
    Client, Endpoints, SessionError, ToolPaths, default_client,
    filename::{base_filename, remove_stale},
    kaltura::CatalogClient,
    media::{self, CDN_HEADERS, build_manifest_url},
    metadata::write_metadata,
    model::{FlavorProfile, Session, SessionSource, Webinar},
    rainfocus::{ConferenceClient, LandingPage, OnDemandClient},
    selector::select_best,
};
use tracing::info;

use crate::{
    cli::Source,
    config::AppConfig,
    error::Result,
    output::{DownloadBar, OutputManager},
};

/// Everything one run needs, resolved from arguments and config.
pub struct RunOptions {
    pub source: Source,
    pub auth_token: Option<String>,
    pub directory: PathBuf,
    pub write_meta: bool,
    pub quiet: bool,
}

pub struct CommandExecutor {
    client: Client,
    endpoints: Endpoints,
    tools: ToolPaths,
    output: OutputManager,
}

/// Where the session came from; decides how its CDN credentials are obtained.
enum Resolved {
    Conference(ConferenceClient),
    OnDemand(LandingPage),
}

impl CommandExecutor {
    pub fn new(config: AppConfig, timeout: Option<u64>, colored: bool) -> Result<Self> {
        let client = default_client(config.timeout(timeout))?;
        Ok(Self {
            client,
            tools: config.tool_paths(),
            endpoints: config.endpoints,
            output: OutputManager::new(colored),
        })
    }

    /// Runs the whole pipeline and returns the download tool's exit code.
    pub async fn download(&self, options: RunOptions) -> Result<i32> {
        let (session, resolved) = self.fetch_session(&options).await?;

        let presenters = session.display_names();
        self.output.field("title", &session.title);
        self.output.field("abstract", &session.abstract_text);
        self.output.field("presenters", &presenters);

        tokio::fs::create_dir_all(&options.directory).await?;
        let base = base_filename(&session);
        let video_path = options.directory.join(format!("{base}.mp4"));
        self.output.field("video path", video_path.display());
        remove_stale(&video_path).await?;

        let meta_path = if options.write_meta {
            let path = options.directory.join(format!("{base}.json"));
            remove_stale(&path).await?;
            self.output.field("metadata path", path.display());
            Some(path)
        } else {
            None
        };

        let webinar = match &resolved {
            Resolved::Conference(client) => client.fetch_webinar(&session).await?,
            Resolved::OnDemand(page) => {
                Webinar::anonymous(page.partner_id.clone(), on_demand_entry_id(&session)?)
            }
        };
        info!(
            "partner {} entry {} (token: {})",
            webinar.partner_id,
            webinar.entry_id,
            webinar.ks.is_some()
        );

        let catalog = CatalogClient::new(self.client.clone(), self.endpoints.clone())
            .fetch_for(&webinar)
            .await?;
        let profile = select_best(&catalog.profiles)?;
        self.output.field("selected profile", profile);

        let manifest_url = build_manifest_url(
            &self.endpoints.manifest_host,
            &webinar.partner_id,
            &catalog.entry_id,
            &profile.id,
            webinar.ks.as_deref(),
        );

        let length =
            media::probe_duration(&self.tools.ffprobe, &manifest_url, &CDN_HEADERS).await?;
        self.output.field("length", format!("{length} seconds"));

        let mut bar = DownloadBar::new(options.quiet);
        let outcome = media::download(
            &self.tools.ffmpeg,
            &manifest_url,
            &CDN_HEADERS,
            length,
            &video_path,
            &mut bar,
        )
        .await?;
        if outcome.success() {
            self.output.status("download", true, "succeeded");
        } else {
            self.output.status("download", false, "failed");
        }

        // written regardless of the download result
        if let Some(meta_path) = meta_path {
            self.write_meta(&meta_path, &session, profile).await?;
        }

        Ok(outcome.exit_code)
    }

    async fn fetch_session(&self, options: &RunOptions) -> Result<(Session, Resolved)> {
        match &options.source {
            Source::Conference(id) => {
                let client = ConferenceClient::new(
                    self.client.clone(),
                    self.endpoints.clone(),
                    options.auth_token.as_deref(),
                )?;
                let session = client.fetch_session(id).await?;
                Ok((session, Resolved::Conference(client)))
            }
            Source::OnDemand(url) => {
                let page = LandingPage::fetch(&self.client, url).await?;
                info!(
                    "landing page: session {} partner {}",
                    page.session_id, page.partner_id
                );
                let session = OnDemandClient::new(self.client.clone(), self.endpoints.clone())
                    .fetch_session(&page.session_id)
                    .await?;
                Ok((session, Resolved::OnDemand(page)))
            }
        }
    }

    async fn write_meta(
        &self,
        path: &Path,
        session: &Session,
        profile: &FlavorProfile,
    ) -> Result<()> {
        write_metadata(path, &self.endpoints.catalog_page_url, session, profile).await?;
        self.output.field("metadata", "written");
        Ok(())
    }
}

fn on_demand_entry_id(session: &Session) -> Result<String> {
    match &session.source {
        SessionSource::OnDemand { entry_id } => Ok(entry_id.clone()),
        SessionSource::Conference { .. } => {
            Err(SessionError::DataShape(format!(
                "session {} is not an on-demand session",
                session.session_id
            ))
            .into())
        }
    }
}
