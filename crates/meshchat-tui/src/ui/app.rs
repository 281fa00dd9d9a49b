//! Session state and the application of dispatched actions.
//!
//! The App is owned by the session loop alone. The directory snapshot and
//! the radio handle are injected at construction; nothing here reaches for
//! ambient state.

use meshchat_core::directory::Directory;
use meshchat_core::packet::PacketEvent;
use meshchat_core::transport::RadioHandle;

use crate::commands::{self, Action};
use crate::pipeline;
use crate::scrollback::{LogLine, ScrollBack};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum View {
    Chat,
    /// Transient help screen; any key returns to the chat view.
    Help,
}

pub(crate) struct App {
    pub input: String,
    /// 0 pins the window to the bottom; a positive value is the number of
    /// trailing lines the rendered window includes.
    pub scroll_offset: usize,
    pub scrollback: ScrollBack,
    pub active_channel: u32,
    pub running: bool,
    pub view: View,
    pub prompt: String,
    directory: Directory,
    radio: RadioHandle,
}

impl App {
    pub fn new(directory: Directory, radio: RadioHandle, prompt: String, capacity: usize) -> Self {
        Self {
            input: String::new(),
            scroll_offset: 0,
            scrollback: ScrollBack::new(capacity),
            active_channel: 0,
            running: true,
            view: View::Chat,
            prompt,
            directory,
            radio,
        }
    }

    pub fn enter_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// The first Up widens the window to the whole buffer, then each Up
    /// narrows it by one, floored at a single line.
    pub fn scroll_up(&mut self) {
        if self.scroll_offset == 0 {
            self.scroll_offset = self.scrollback.len();
        }
        if self.scroll_offset > 1 {
            self.scroll_offset -= 1;
        }
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset < self.scrollback.len().saturating_sub(1) {
            self.scroll_offset += 1;
        }
    }

    /// Dispatches the current input line and resets it.
    pub fn submit(&mut self) {
        let action = commands::parse(&self.input);
        self.input.clear();
        self.apply(action);
    }

    /// Inbound path: packets mutate only the scroll-back, never the input
    /// line or the scroll offset.
    pub fn ingest_packet(&mut self, packet: &PacketEvent) {
        self.scrollback
            .append_many(pipeline::ingest(packet, &self.directory));
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::NoOp => {}
            Action::ShowHelp => self.view = View::Help,
            Action::Quit => self.quit(),
            Action::ClearScreen => self.scrollback.clear(),
            Action::Notice(text) => self.notice(text),
            Action::ListNodes => self.list_nodes(),
            Action::ListChannels => self.list_channels(),
            Action::SwitchChannel(index) => self.switch_channel(index),
            Action::SendPublic(text) => self.send_public(text),
            Action::SendPrivate { destination, text } => self.send_private(destination, text),
        }
    }

    fn notice(&mut self, text: &str) {
        self.scrollback.append(LogLine::public(text));
    }

    fn list_nodes(&mut self) {
        let mut lines = vec![LogLine::public(""), LogLine::public("Nodes:")];
        for (id, name) in self.directory.nodes() {
            lines.push(LogLine::public(format!(" {id}: {name}")));
        }
        self.scrollback.append_many(lines);
    }

    fn list_channels(&mut self) {
        let mut lines = vec![LogLine::public(""), LogLine::public("Channels:")];
        for index in self.directory.channel_indices() {
            lines.push(LogLine::public(format!(" {index}")));
        }
        self.scrollback.append_many(lines);
    }

    /// Local-UI-only switch: the new index is carried by subsequent sends,
    /// but no channel reconfiguration is requested from the gateway.
    fn switch_channel(&mut self, index: u32) {
        if self.directory.is_valid_channel(index) {
            let line = format!(
                "Switching from channel {} to channel {}",
                self.active_channel, index
            );
            self.active_channel = index;
            self.notice(&line);
        } else {
            self.notice(commands::INVALID_CHANNEL);
        }
    }

    fn send_public(&mut self, text: String) {
        if let Err(err) = self
            .radio
            .send_text(text.clone(), None, self.active_channel)
        {
            tracing::warn!(%err, "transport command channel closed; message not sent");
        }
        self.scrollback
            .append(pipeline::echo_public(&self.prompt, &text));
    }

    fn send_private(&mut self, destination: String, text: String) {
        if let Err(err) =
            self.radio
                .send_text(text.clone(), Some(destination.clone()), self.active_channel)
        {
            tracing::warn!(%err, "transport command channel closed; message not sent");
        }
        let name = self.directory.resolve_name(&destination).to_string();
        self.scrollback
            .append(pipeline::echo_private(&self.prompt, &destination, &name, &text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshchat_core::packet::{ChannelInfo, ChannelRole, Decoded, NodeInfo, PortNum};
    use meshchat_core::transport::TransportCommand;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn fixture() -> (App, UnboundedReceiver<TransportCommand>) {
        let directory = Directory::load(
            "me",
            &[
                NodeInfo {
                    id: "abc123".into(),
                    short_name: "Bob".into(),
                },
                NodeInfo {
                    id: "def456".into(),
                    short_name: "Eve".into(),
                },
            ],
            &[
                ChannelInfo {
                    index: 0,
                    role: ChannelRole::Primary,
                },
                ChannelInfo {
                    index: 1,
                    role: ChannelRole::Secondary,
                },
            ],
        );
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let app = App::new(directory, RadioHandle::new(command_tx), "me@test>".into(), 20);
        (app, command_rx)
    }

    fn submit(app: &mut App, line: &str) {
        app.input = line.to_string();
        app.submit();
    }

    fn last_line(app: &App) -> LogLine {
        app.scrollback.window(1).next().cloned().expect("buffer is empty")
    }

    #[test]
    fn private_message_sends_and_echoes() {
        let (mut app, mut command_rx) = fixture();
        submit(&mut app, "/m !abc123 hello there");

        assert_eq!(
            command_rx.try_recv().unwrap(),
            TransportCommand::SendText {
                text: "hello there".into(),
                destination: Some("abc123".into()),
                channel: 0,
            }
        );
        let echo = last_line(&app);
        assert!(echo.private);
        assert!(echo.text.contains("to abc123 (Bob)"));
        assert!(echo.text.contains("hello there"));
        assert!(app.input.is_empty());
    }

    #[test]
    fn public_message_sends_on_the_active_channel() {
        let (mut app, mut command_rx) = fixture();
        submit(&mut app, "/sc 1");
        submit(&mut app, "hello mesh");

        let command = command_rx.try_recv().unwrap();
        assert_eq!(
            command,
            TransportCommand::SendText {
                text: "hello mesh".into(),
                destination: None,
                channel: 1,
            }
        );
        let echo = last_line(&app);
        assert!(!echo.private);
        assert!(echo.text.contains("me@test> hello mesh"));
    }

    #[test]
    fn empty_input_never_sends() {
        let (mut app, mut command_rx) = fixture();
        submit(&mut app, "");
        submit(&mut app, "   ");
        assert!(command_rx.try_recv().is_err());
        assert!(app.scrollback.is_empty());
    }

    #[test]
    fn switch_channel_round_trip() {
        let (mut app, _command_rx) = fixture();
        submit(&mut app, "/sc 1");
        assert_eq!(app.active_channel, 1);
        assert_eq!(
            last_line(&app).text,
            "Switching from channel 0 to channel 1"
        );

        submit(&mut app, "/sc 99");
        assert_eq!(app.active_channel, 1);
        assert_eq!(last_line(&app).text, commands::INVALID_CHANNEL);
    }

    #[test]
    fn listings_append_headers_and_entries() {
        let (mut app, _command_rx) = fixture();
        submit(&mut app, "/ln");
        let lines: Vec<String> = app
            .scrollback
            .window(app.scrollback.len())
            .map(|line| line.text.clone())
            .collect();
        assert_eq!(lines, vec!["", "Nodes:", " abc123: Bob", " def456: Eve"]);

        submit(&mut app, "/lc");
        let tail: Vec<String> = app
            .scrollback
            .window(4)
            .map(|line| line.text.clone())
            .collect();
        assert_eq!(tail, vec!["", "Channels:", " 0", " 1"]);
    }

    #[test]
    fn clear_screen_empties_the_buffer() {
        let (mut app, _command_rx) = fixture();
        submit(&mut app, "hello");
        submit(&mut app, "/cs");
        assert!(app.scrollback.is_empty());
        assert!(app.input.is_empty());
    }

    #[test]
    fn quit_stops_the_loop() {
        let (mut app, _command_rx) = fixture();
        submit(&mut app, "/q");
        assert!(!app.running);
    }

    #[test]
    fn unknown_command_appends_the_notice() {
        let (mut app, mut command_rx) = fixture();
        submit(&mut app, "/frobnicate");
        assert_eq!(last_line(&app).text, commands::INVALID_COMMAND);
        assert!(command_rx.try_recv().is_err());
    }

    #[test]
    fn help_command_switches_the_view() {
        let (mut app, _command_rx) = fixture();
        submit(&mut app, "/h");
        assert_eq!(app.view, View::Help);
    }

    #[test]
    fn scroll_up_floors_at_one() {
        let (mut app, _command_rx) = fixture();
        for n in 0..5 {
            app.scrollback.append(LogLine::public(format!("line {n}")));
        }
        app.scroll_up();
        assert_eq!(app.scroll_offset, 4);
        for _ in 0..10 {
            app.scroll_up();
        }
        assert_eq!(app.scroll_offset, 1);
    }

    #[test]
    fn scroll_down_caps_below_length() {
        let (mut app, _command_rx) = fixture();
        for n in 0..5 {
            app.scrollback.append(LogLine::public(format!("line {n}")));
        }
        for _ in 0..10 {
            app.scroll_down();
        }
        assert_eq!(app.scroll_offset, 4);
    }

    #[test]
    fn inbound_packet_leaves_input_and_scroll_untouched() {
        let (mut app, _command_rx) = fixture();
        app.input = "typing".into();
        app.scroll_offset = 2;
        app.ingest_packet(&PacketEvent {
            decoded: Some(Decoded {
                portnum: PortNum::TextMessageApp,
                payload: b"line1\nline2".to_vec(),
            }),
            from_id: "n1".into(),
            to_id: "^all".into(),
        });
        assert_eq!(app.scrollback.len(), 2);
        assert!(last_line(&app).text.contains("Unknown: line2"));
        assert_eq!(app.input, "typing");
        assert_eq!(app.scroll_offset, 2);
    }
}
