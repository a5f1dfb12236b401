//! Per-message render session
//!
//! Every inbound message runs the same straight line:
//!
//! ```text
//! AwaitingMessage -> Validating -> (Rejected | Building) -> (Failed | Rendered)
//! ```
//!
//! Nothing carries over from one message to the next except the last
//! terminal state, which the next message overwrites.

use crate::builder::RowBuilder;
use crate::config::{LengthPolicy, RenderOptions, WebAppConfig};
use crate::data::ChartTable;
use crate::error::ChartError;
use crate::filters::{apply_filters, parse_filters};
use crate::message::{parse_message, request_config, InboundMessage, ParentChannel};
use crate::render::{ChartRenderer, FatalErrorSurface, LibraryHandle, LibraryStatus};
use crate::validation::{validate_config, validate_parameters, ParameterSchema};
use crate::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, warn, Instrument};

/// Where a session is in handling its current message
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    AwaitingMessage,
    Validating,
    Building,
    /// Validation failed; nothing was built
    Rejected(ChartError),
    /// Building, filtering or drawing failed; nothing was drawn
    Failed(ChartError),
    /// Chart drawn
    Rendered { rows: usize },
}

impl RenderState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingMessage => "awaiting_message",
            Self::Validating => "validating",
            Self::Building => "building",
            Self::Rejected(_) => "rejected",
            Self::Failed(_) => "failed",
            Self::Rendered { .. } => "rendered",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Rejected(_) | Self::Failed(_) | Self::Rendered { .. }
        )
    }

    /// Error that ended the message, if any
    pub fn error(&self) -> Option<&ChartError> {
        match self {
            Self::Rejected(e) | Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Validates, builds and renders one message at a time
pub struct RenderSession<S, R, E> {
    schema: S,
    renderer: R,
    surface: E,
    library: LibraryHandle,
    builder: RowBuilder,
    options: RenderOptions,
    state: RenderState,
}

impl<S, R, E> RenderSession<S, R, E>
where
    S: ParameterSchema,
    R: ChartRenderer,
    E: FatalErrorSurface,
{
    pub fn new(schema: S, renderer: R, surface: E, library: LibraryHandle) -> Self {
        Self {
            schema,
            renderer,
            surface,
            library,
            builder: RowBuilder::default(),
            options: RenderOptions::default(),
            state: RenderState::AwaitingMessage,
        }
    }

    /// Use a length policy other than strict
    pub fn with_policy(mut self, policy: LengthPolicy) -> Self {
        self.builder = RowBuilder::new(policy);
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Follow a viewport resize
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.options = self.options.resized(width, height);
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn surface(&self) -> &E {
        &self.surface
    }

    /// Parse and handle a raw channel message. Ignored payloads leave the
    /// session untouched and return `None`.
    pub async fn handle_raw(&mut self, raw: &str) -> Option<RenderState> {
        let message = parse_message(raw)?;
        Some(self.handle(message).await)
    }

    /// Handle one message through to a terminal state
    pub async fn handle(&mut self, message: InboundMessage) -> RenderState {
        let span = info_span!("message", request_id = %message.request_id);
        self.process(message).instrument(span).await
    }

    /// Ask the parent for configuration, then handle every message until
    /// the inbox closes.
    pub async fn run<C: ParentChannel + ?Sized>(
        &mut self,
        channel: &C,
        mut inbox: mpsc::Receiver<String>,
    ) {
        request_config(channel);
        while let Some(raw) = inbox.recv().await {
            if self.handle_raw(&raw).await.is_none() {
                debug!("message ignored");
            }
        }
        info!("host channel closed");
    }

    async fn process(&mut self, message: InboundMessage) -> RenderState {
        self.transition(RenderState::Validating);
        if let Err(e) = self.validate(&message.web_app_config).await {
            return self.abort(e);
        }

        self.transition(RenderState::Building);
        let table = match self.build(&message) {
            Ok(table) => table,
            Err(e) => return self.abort(e),
        };

        if let Err(e) = self.renderer.draw(&table, &self.options) {
            return self.abort(e);
        }
        info!(rows = table.len(), "chart rendered");
        self.transition(RenderState::Rendered { rows: table.len() })
    }

    async fn validate(&mut self, config: &WebAppConfig) -> Result<()> {
        validate_parameters(config, &self.schema)?;
        validate_config(config, self.library.status())?;

        if self.library.status() == LibraryStatus::Loading {
            debug!("waiting for the charting library");
        }
        match self.library.ready().await {
            LibraryStatus::Loaded => Ok(()),
            _ => Err(ChartError::DependencyUnavailable),
        }
    }

    fn build(&self, message: &InboundMessage) -> Result<ChartTable> {
        let table = self.builder.build(&message.web_app_config)?;
        let filters = parse_filters(&message.filters)?;
        apply_filters(table, &filters)
    }

    fn abort(&mut self, error: ChartError) -> RenderState {
        warn!(%error, "chart not rendered");
        self.surface.display_fatal_error(&error.to_string());
        if error.is_rejection() {
            self.transition(RenderState::Rejected(error))
        } else {
            self.transition(RenderState::Failed(error))
        }
    }

    fn transition(&mut self, next: RenderState) -> RenderState {
        debug!(from = self.state.name(), to = next.name(), "state transition");
        self.state = next;
        self.state.clone()
    }
}
