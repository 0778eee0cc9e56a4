use anyhow::Result;
use ratatui::prelude::*;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::action::Action;
use crate::config::AppConfig;
use crate::event::{self, EventHandler};
use crate::feed;
use crate::lifecycle::{self, BackHandler, Bundle, TimeCapsule};
use crate::models::post::Post;
use crate::models::PostCollection;
use crate::tui::Tui;
use crate::ui::home::{Painter, ScrollState};
use crate::ui::statusbar;
use crate::view::{self, FeedCallbacks};
use crate::{data, images};

const NAVIGATION_KEY: &str = "home.navigation";

/// Host-side position in the feed. Saved through the time capsule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeNavigation {
    pub focus: usize,
    pub scroll: ScrollState,
}

/// The one-line report of the last callback the feed raised. While it
/// shows it is the innermost back scope.
#[derive(Debug, Default)]
struct NoticeScope {
    message: Option<String>,
}

impl BackHandler for NoticeScope {
    fn try_handle(&mut self) -> bool {
        self.message.take().is_some()
    }
}

impl FeedCallbacks for mpsc::UnboundedSender<Action> {
    fn open_drawer(&mut self) {
        let _ = self.send(Action::DrawerRequested);
    }

    fn post_selected(&mut self, post: &Post) {
        let _ = self.send(Action::PostSelected {
            id: post.id.clone(),
            title: post.title.clone(),
        });
    }
}

pub struct App {
    should_quit: bool,
    config: AppConfig,
    posts: PostCollection,
    navigation: HomeNavigation,
    notice: NoticeScope,
    capsule: TimeCapsule,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Load the sample feed, attach images, and restore any saved state.
    /// Runs before the first frame. `saved` is a bundle from an earlier
    /// `save_instance_state`; only a host that keeps it can pass one, and
    /// the terminal binary keeps none.
    pub fn new(config: AppConfig, saved: Option<Bundle>) -> Result<Self> {
        let posts = images::load_images(data::sample_posts()?)?;
        info!(count = posts.len(), "loaded posts");
        Self::with_posts(config, posts, saved)
    }

    pub fn with_posts(
        config: AppConfig,
        posts: PostCollection,
        saved: Option<Bundle>,
    ) -> Result<Self> {
        let clickables = feed::home_screen(&posts)?.clickables().len();

        let capsule = TimeCapsule::from_bundle(saved);
        let mut navigation: HomeNavigation =
            capsule.restore_typed(NAVIGATION_KEY).unwrap_or_default();
        navigation.focus = navigation.focus.min(clickables.saturating_sub(1));

        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Ok(App {
            should_quit: false,
            config,
            posts,
            navigation,
            notice: NoticeScope::default(),
            capsule,
            action_tx,
            action_rx,
        })
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut events = EventHandler::new(self.config.tick_rate());

        loop {
            let mut drawn = Ok(());
            terminal.draw(|frame| drawn = self.draw(frame))?;
            drawn?;

            tokio::select! {
                Some(event) = events.next() => {
                    if let Some(action) = event::event_to_action(event) {
                        self.dispatch(action);
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    self.update(action)?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        let bundle = self.save_instance_state();
        debug!(entries = bundle.len(), "saved instance state on exit");
        Ok(())
    }

    fn dispatch(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    fn clickable_count(&self) -> Result<usize> {
        Ok(feed::home_screen(&self.posts)?.clickables().len())
    }

    /// Write host state into the capsule and hand back its contents.
    pub fn save_instance_state(&mut self) -> Bundle {
        self.capsule.save_typed(NAVIGATION_KEY, &self.navigation);
        self.capsule.to_bundle()
    }

    fn on_back_pressed(&mut self) {
        if !lifecycle::dispatch_back(&mut [&mut self.notice]) {
            info!("back press unhandled, exiting");
            self.should_quit = true;
        }
    }

    fn update(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Render => {}

            Action::FocusNext => {
                let last = self.clickable_count()?.saturating_sub(1);
                self.navigation.focus = (self.navigation.focus + 1).min(last);
            }
            Action::FocusPrev => {
                self.navigation.focus = self.navigation.focus.saturating_sub(1);
            }
            Action::FocusFirst => {
                self.navigation.focus = 0;
                self.navigation.scroll.vertical = 0;
            }
            Action::FocusLast => {
                self.navigation.focus = self.clickable_count()?.saturating_sub(1);
            }
            Action::Activate => {
                let screen = feed::home_screen(&self.posts)?;
                if let Some(intent) = screen.clickables().get(self.navigation.focus) {
                    view::dispatch(*intent, &mut self.action_tx);
                }
            }

            Action::Back => self.on_back_pressed(),
            Action::SaveState => {
                let bundle = self.save_instance_state();
                debug!(entries = bundle.len(), "saved instance state");
            }

            Action::DrawerRequested => {
                info!("drawer requested");
                self.notice.message = Some("Drawer requested".to_string());
            }
            Action::PostSelected { id, title } => {
                info!(post_id = %id, "post selected");
                self.notice.message = Some(format!("Selected: {}", title));
            }
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let screen = feed::home_screen(&self.posts)?;
        let mut painter = Painter::new(
            Some(self.navigation.focus),
            &mut self.navigation.scroll,
            self.config.popular_card_width,
        );
        painter.paint(&screen, chunks[0], frame.buffer_mut());

        statusbar::draw_statusbar(
            frame,
            chunks[1],
            self.notice.message.as_deref(),
            self.config.show_hints,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(AppConfig::default(), None).unwrap()
    }

    fn pump(app: &mut App, action: Action) {
        app.update(action).unwrap();
        while let Ok(next) = app.action_rx.try_recv() {
            app.update(next).unwrap();
        }
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame).unwrap()).unwrap();
        let buf = terminal.backend().buffer().clone();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn navigation_icon_requests_the_drawer() {
        let mut app = app();
        pump(&mut app, Action::Activate);
        assert_eq!(app.notice.message.as_deref(), Some("Drawer requested"));
    }

    #[test]
    fn activating_the_top_card_selects_post_three() {
        let mut app = app();
        let expected = app.posts[3].title.clone();

        app.update(Action::FocusNext).unwrap();
        app.update(Action::Activate).unwrap();

        assert_eq!(
            app.action_rx.try_recv().unwrap(),
            Action::PostSelected {
                id: app.posts[3].id.clone(),
                title: expected,
            }
        );
        assert!(app.action_rx.try_recv().is_err());
    }

    #[test]
    fn focus_stays_in_bounds() {
        let mut app = app();
        pump(&mut app, Action::FocusPrev);
        assert_eq!(app.navigation.focus, 0);

        pump(&mut app, Action::FocusLast);
        assert_eq!(app.navigation.focus, 11);
        pump(&mut app, Action::FocusNext);
        assert_eq!(app.navigation.focus, 11);
    }

    #[test]
    fn back_dismisses_the_notice_before_exiting() {
        let mut app = app();
        pump(&mut app, Action::Activate);

        pump(&mut app, Action::Back);
        assert!(app.notice.message.is_none());
        assert!(!app.should_quit);

        pump(&mut app, Action::Back);
        assert!(app.should_quit);
    }

    #[test]
    fn navigation_survives_a_save_and_restore() {
        let mut app = app();
        for _ in 0..9 {
            pump(&mut app, Action::FocusNext);
        }
        screen(&mut app);
        let saved = app.navigation.clone();
        let bundle = app.save_instance_state();

        let restored = App::new(AppConfig::default(), Some(bundle)).unwrap();
        assert_eq!(restored.navigation, saved);
        assert_eq!(restored.navigation.focus, 9);
    }

    #[test]
    fn restored_focus_is_clamped() {
        let mut bundle = Bundle::new();
        bundle.insert(
            NAVIGATION_KEY.to_string(),
            serde_json::json!({ "focus": 99, "scroll": { "vertical": 0, "horizontal": [] } }),
        );
        let app = App::new(AppConfig::default(), Some(bundle)).unwrap();
        assert_eq!(app.navigation.focus, 11);
    }

    #[test]
    fn too_few_posts_fail_at_startup() {
        let mut posts = images::load_images(data::sample_posts().unwrap())
            .unwrap()
            .into_inner();
        posts.truncate(7);
        assert!(App::with_posts(AppConfig::default(), PostCollection::new(posts), None).is_err());
    }

    #[test]
    fn draws_feed_and_status_bar() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("Jetnews"));
        assert!(text.contains("Top stories for you"));
        assert!(text.contains("Esc: back"));

        pump(&mut app, Action::Activate);
        assert!(screen(&mut app).contains("Drawer requested"));
    }
}
