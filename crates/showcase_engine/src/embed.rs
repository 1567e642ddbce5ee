use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use showcase_core::{
    generate_container_id, stagger_delay, update_embed, Breakpoint, ContentSize, EmbedEffect,
    EmbedMsg, EmbedSettings, EmbedState, LayoutSettings, ProjectDescriptor, ShowcaseSettings,
    ValidationError,
};
use showcase_logging::{showcase_debug, showcase_error};

use crate::classes::*;
use crate::schedule::ScheduledTask;
use crate::surface::{DomEvent, EventKind, NodeId, Surface, SurfaceRef, Target};

const FRAME_TITLE: &str = "Project Preview";
const LOADING_MESSAGE: &str = "Loading project...";
const ERROR_MESSAGE_TEXT: &str = "Unable to load project preview.";
const ERROR_LINK_TEXT: &str = "Open in new tab →";
const INFO_LINK_TEXT: &str = "View Live Project →";
const EXTERNAL_REL: &str = "noopener noreferrer";

/// Where a batch of embeds is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerTarget {
    Node(NodeId),
    /// First element matching the selector.
    Selector(String),
}

/// Builds project embeds: browser chrome, sandboxed frame with load
/// overlays, and an info panel.
pub struct EmbedBuilder {
    surface: SurfaceRef,
    embed: EmbedSettings,
    layout: LayoutSettings,
}

struct ContentParts {
    region: NodeId,
    frame: NodeId,
    loading: NodeId,
    error: NodeId,
}

impl EmbedBuilder {
    pub fn new(surface: SurfaceRef, settings: &ShowcaseSettings) -> Self {
        Self {
            surface,
            embed: settings.embed.clone(),
            layout: settings.layout.clone(),
        }
    }

    /// Build one embed, detached. Invalid descriptors are logged and yield
    /// `None` without touching the document.
    pub fn build(&self, project: &ProjectDescriptor) -> Option<NodeId> {
        match self.try_build(project) {
            Ok(container) => Some(container),
            Err(err) => {
                showcase_error!("ProjectEmbed: {}", err);
                None
            }
        }
    }

    pub fn try_build(&self, project: &ProjectDescriptor) -> Result<NodeId, ValidationError> {
        project.validate()?;
        let surface = self.surface.as_ref();

        let container = element(surface, "div", &[EMBED_CONTAINER]);
        let id = project
            .container_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| generate_container_id(surface.now_ms(), surface.random()));
        surface.set_attribute(container, "id", &id);

        let chrome = self.browser_chrome(&project.url);
        let content = self.content_region(&project.url);
        let info = self.info_panel(project);

        let wrapper = element(surface, "div", &[EMBED_WRAPPER]);
        surface.append_child(wrapper, chrome);
        surface.append_child(wrapper, content.region);
        surface.append_child(wrapper, info);
        surface.append_child(container, wrapper);

        self.watch_load(&content);

        showcase_debug!("ProjectEmbed: built {} for {}", id, project.url);
        Ok(container)
    }

    /// Build every valid descriptor into a grid appended to `target`, then
    /// reveal the embeds one after another.
    ///
    /// Returns the grid. An empty or absent collection, or a target that
    /// cannot be found, is logged and leaves the document untouched.
    pub fn build_many(
        &self,
        projects: Option<&[ProjectDescriptor]>,
        target: &ContainerTarget,
    ) -> Option<NodeId> {
        match self.try_build_many(projects, target) {
            Ok(grid) => Some(grid),
            Err(err) => {
                showcase_error!("ProjectEmbed: {}", err);
                None
            }
        }
    }

    fn try_build_many(
        &self,
        projects: Option<&[ProjectDescriptor]>,
        target: &ContainerTarget,
    ) -> Result<NodeId, ValidationError> {
        let projects = projects
            .filter(|projects| !projects.is_empty())
            .ok_or(ValidationError::EmptyCollection)?;
        let container = self.resolve(target)?;
        let surface = self.surface.as_ref();

        let grid = element(surface, "div", &[EMBED_GRID]);
        let embeds: Vec<NodeId> = projects
            .iter()
            .filter_map(|project| self.build(project))
            .collect();
        for embed in &embeds {
            surface.append_child(grid, *embed);
        }
        surface.append_child(container, grid);

        showcase_debug!(
            "ProjectEmbed: mounted {} of {} embeds",
            embeds.len(),
            projects.len()
        );
        self.reveal_in_sequence(embeds);
        Ok(grid)
    }

    fn resolve(&self, target: &ContainerTarget) -> Result<NodeId, ValidationError> {
        match target {
            ContainerTarget::Node(node) => Ok(*node),
            ContainerTarget::Selector(selector) => self
                .surface
                .query_all(selector)
                .into_iter()
                .next()
                .ok_or_else(|| ValidationError::ContainerNotFound(selector.clone())),
        }
    }

    fn reveal_in_sequence(&self, embeds: Vec<NodeId>) {
        let weak = Rc::downgrade(&self.surface);
        let stagger = self.embed.grid_stagger();
        ScheduledTask::schedule(&self.surface, self.embed.grid_initial_delay(), move || {
            let Some(surface) = weak.upgrade() else {
                return;
            };
            for (index, embed) in embeds.into_iter().enumerate() {
                let target = Rc::downgrade(&surface);
                ScheduledTask::schedule(&surface, stagger_delay(index, stagger), move || {
                    if let Some(surface) = target.upgrade() {
                        surface.add_class(embed, VISIBLE);
                    }
                });
            }
        });
    }

    fn browser_chrome(&self, url: &str) -> NodeId {
        let surface = self.surface.as_ref();
        let chrome = element(surface, "div", &[BROWSER_CHROME]);
        let dots = element(surface, "div", &[BROWSER_DOTS]);
        for (color, label) in [("red", "Close"), ("yellow", "Minimize"), ("green", "Maximize")] {
            let dot = element(surface, "div", &[BROWSER_DOT, color]);
            surface.set_attribute(dot, "aria-label", label);
            surface.append_child(dots, dot);
        }

        let url_bar = element(surface, "div", &[BROWSER_URL]);
        surface.set_text(url_bar, url);
        surface.set_attribute(url_bar, "title", url);

        surface.append_child(chrome, dots);
        surface.append_child(chrome, url_bar);
        chrome
    }

    fn content_region(&self, url: &str) -> ContentParts {
        let surface = self.surface.as_ref();
        let region = element(surface, "div", &[CONTENT_REGION]);
        apply_content_size(
            surface,
            region,
            self.layout.content_size(surface.viewport_width()),
        );
        surface.set_style(region, "box-sizing", "border-box");

        let frame = surface.create_element("iframe");
        surface.set_attribute(frame, "src", url);
        surface.set_attribute(frame, "allow", &self.embed.allow);
        surface.set_attribute(frame, "allowfullscreen", "");
        surface.set_attribute(frame, "sandbox", &self.embed.sandbox_tokens());
        surface.set_attribute(frame, "loading", "lazy");
        surface.set_attribute(frame, "title", FRAME_TITLE);
        for (property, value) in [
            ("width", "100%"),
            ("height", "100%"),
            ("display", "block"),
            ("border", "none"),
        ] {
            surface.set_style(frame, property, value);
        }

        let loading = element(surface, "div", &[LOADING_OVERLAY]);
        let loading_text = element(surface, "div", &[LOADING_TEXT]);
        surface.set_text(loading_text, LOADING_MESSAGE);
        surface.append_child(loading, loading_text);

        let error = element(surface, "div", &[ERROR_OVERLAY, HIDDEN]);
        let message = element(surface, "div", &[ERROR_MESSAGE]);
        surface.set_text(message, ERROR_MESSAGE_TEXT);
        let link = external_link(surface, ERROR_LINK, url, ERROR_LINK_TEXT);
        surface.append_child(error, message);
        surface.append_child(error, link);

        surface.append_child(region, frame);
        surface.append_child(region, loading);
        surface.append_child(region, error);

        ContentParts {
            region,
            frame,
            loading,
            error,
        }
    }

    fn info_panel(&self, project: &ProjectDescriptor) -> NodeId {
        let surface = self.surface.as_ref();
        let info = element(surface, "div", &[INFO_PANEL]);

        let title = element(surface, "h3", &[INFO_TITLE]);
        surface.set_text(title, &project.title);
        surface.append_child(info, title);

        if let Some(description) = project.description() {
            let paragraph = element(surface, "p", &[INFO_DESCRIPTION]);
            surface.set_text(paragraph, description);
            surface.append_child(info, paragraph);
        }

        let link = external_link(surface, INFO_LINK, &project.url, INFO_LINK_TEXT);
        surface.append_child(info, link);
        info
    }

    fn watch_load(&self, content: &ContentParts) {
        let widget = Rc::new(LoadWatch {
            surface: Rc::downgrade(&self.surface),
            loading: content.loading,
            error: content.error,
            state: Cell::new(EmbedState::Loading),
            timer: RefCell::new(None),
        });

        let weak = Rc::downgrade(&widget);
        let timer = ScheduledTask::schedule(&self.surface, self.embed.load_timeout(), move || {
            if let Some(widget) = weak.upgrade() {
                widget.dispatch(EmbedMsg::LoadTimedOut);
            }
        });
        *widget.timer.borrow_mut() = Some(timer);

        for (kind, msg) in [
            (EventKind::Load, EmbedMsg::FrameLoaded),
            (EventKind::Error, EmbedMsg::FrameFailed),
        ] {
            let widget = widget.clone();
            self.surface.listen(
                Target::Node(content.frame),
                kind,
                Rc::new(move |_: &DomEvent| widget.dispatch(msg)),
            );
        }
    }
}

/// Overlay pair of one embed, owned by the frame's listeners.
struct LoadWatch {
    surface: Weak<dyn Surface>,
    loading: NodeId,
    error: NodeId,
    state: Cell<EmbedState>,
    timer: RefCell<Option<ScheduledTask>>,
}

impl LoadWatch {
    fn dispatch(&self, msg: EmbedMsg) {
        let (next, effects) = update_embed(self.state.get(), msg);
        showcase_debug!(
            "ProjectEmbed: {:?} on {:?} -> {:?}",
            msg,
            self.state.get(),
            next
        );
        self.state.set(next);

        let Some(surface) = self.surface.upgrade() else {
            return;
        };
        for effect in effects {
            match effect {
                EmbedEffect::CancelLoadTimer => {
                    if let Some(timer) = self.timer.borrow().as_ref() {
                        timer.cancel();
                    }
                }
                EmbedEffect::HideLoading => surface.add_class(self.loading, HIDDEN),
                EmbedEffect::HideError => surface.add_class(self.error, HIDDEN),
                EmbedEffect::ShowError => surface.remove_class(self.error, HIDDEN),
            }
        }
    }
}

/// Apply the breakpoint modifier and fixed pixel height to a content region.
pub(crate) fn apply_content_size(surface: &dyn Surface, region: NodeId, size: ContentSize) {
    for breakpoint in Breakpoint::ALL {
        if breakpoint != size.breakpoint {
            surface.remove_class(region, breakpoint.class_name());
        }
    }
    surface.add_class(region, size.breakpoint.class_name());

    let height = size.height_css();
    surface.set_style(region, "height", &height);
    surface.set_style(region, "min-height", &height);
    surface.set_style(region, "max-height", &height);
    surface.set_style(region, "flex-shrink", "0");
    surface.set_style(region, "flex-grow", "0");
}

fn element(surface: &dyn Surface, tag: &str, classes: &[&str]) -> NodeId {
    let node = surface.create_element(tag);
    for class in classes {
        surface.add_class(node, class);
    }
    node
}

fn external_link(surface: &dyn Surface, class: &str, href: &str, text: &str) -> NodeId {
    let link = element(surface, "a", &[class]);
    surface.set_attribute(link, "href", href);
    surface.set_attribute(link, "target", "_blank");
    surface.set_attribute(link, "rel", EXTERNAL_REL);
    surface.set_text(link, text);
    link
}
