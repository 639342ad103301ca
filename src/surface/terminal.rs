//! Terminal surface — renders screens as text and reads answers line by line.
//!
//! Line grammar:
//! - `/quit`, `/back`, `/next`
//! - intro: an empty line or `start`
//! - text questions: the line is the answer, submitted immediately
//! - choice questions: option numbers (1-based) or option values; several
//!   may be given at once for multi-select (`1 3`, `1,3`)
//! - while "other" is picked, any other line is the free-text value

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_stream::wrappers::LinesStream;

use crate::error::SurfaceError;
use crate::onboarding::progress::DEFAULT_BAR_WIDTH;
use crate::onboarding::renderer::{InputView, OptionView, QuestionPanel};
use crate::onboarding::{CardEvent, CardOutcome, CardView, CompletionScreen, Screen};

use super::{Surface, SurfaceInput};

const NAME: &str = "terminal";
const PROMPT: &str = "> ";

/// Text surface over a line stream and an async writer.
pub struct TerminalSurface<W> {
    lines: BoxStream<'static, std::io::Result<String>>,
    out: W,
    last: Option<Screen>,
}

impl TerminalSurface<tokio::io::Stdout> {
    /// Read from stdin, write to stdout.
    pub fn stdio() -> Self {
        let lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines()).boxed();
        Self::new(lines, tokio::io::stdout())
    }
}

impl<W: AsyncWrite + Unpin + Send> TerminalSurface<W> {
    pub fn new(lines: BoxStream<'static, std::io::Result<String>>, out: W) -> Self {
        Self {
            lines,
            out,
            last: None,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    async fn write(&mut self, text: &str) -> Result<(), SurfaceError> {
        let output_err = |source| SurfaceError::Output {
            name: NAME.to_string(),
            source,
        };
        self.out.write_all(text.as_bytes()).await.map_err(output_err)?;
        self.out.flush().await.map_err(output_err)
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Surface for TerminalSurface<W> {
    fn name(&self) -> &str {
        NAME
    }

    async fn present(&mut self, screen: &Screen) -> Result<(), SurfaceError> {
        let mut text = render_screen(screen);
        if !screen.is_terminal() {
            text.push_str(PROMPT);
        }
        self.last = Some(screen.clone());
        self.write(&text).await
    }

    async fn notify(&mut self, outcome: &CardOutcome) -> Result<(), SurfaceError> {
        if *outcome == CardOutcome::Unavailable {
            let hint = self
                .last
                .as_ref()
                .map(unavailable_hint)
                .unwrap_or("That isn't available right now.");
            self.write(&format!("  {hint}\n")).await?;
        }
        Ok(())
    }

    async fn next_input(&mut self) -> Result<Option<SurfaceInput>, SurfaceError> {
        loop {
            let line = match self.lines.next().await {
                Some(Ok(line)) => line,
                Some(Err(source)) => {
                    return Err(SurfaceError::Input {
                        name: NAME.to_string(),
                        source,
                    });
                }
                None => return Ok(None),
            };

            let Some(screen) = self.last.as_ref() else {
                continue;
            };
            match parse_line(screen, &line) {
                Some(input) => return Ok(Some(input)),
                None => {
                    tracing::debug!(line = %line, "Unrecognized input");
                    let hint = input_hint(screen);
                    self.write(&format!("  {hint}\n{PROMPT}")).await?;
                }
            }
        }
    }
}

/// Render a screen as terminal text.
pub fn render_screen(screen: &Screen) -> String {
    match screen {
        Screen::Question { progress, card } => {
            let mut out = String::from("\n");
            if let Some(progress) = progress {
                out.push_str(&format!("{progress}\n{}\n\n", progress.bar(DEFAULT_BAR_WIDTH)));
            }
            match card {
                CardView::Intro(intro) => {
                    out.push_str(&format!(
                        "{} {}\n\n{}\n\n  ⏱  {}\n\n  [ {} → ]  (press Enter)\n\n{}\n",
                        intro.title,
                        intro.highlight,
                        intro.body,
                        intro.duration_hint,
                        intro.start_label,
                        intro.footnote,
                    ));
                }
                CardView::Question(panel) => render_panel(&mut out, panel),
            }
            out
        }
        Screen::Completion(done) => render_completion(done),
        Screen::Blank => String::new(),
    }
}

fn render_panel(out: &mut String, panel: &QuestionPanel) {
    out.push_str(&panel.prompt);
    out.push('\n');
    if let Some(description) = &panel.description {
        out.push_str(description);
        out.push('\n');
    }
    out.push('\n');

    match &panel.input {
        InputView::Text {
            value, placeholder, ..
        } => {
            let shown = match (value.is_empty(), placeholder) {
                (false, _) => value.as_str(),
                (true, Some(placeholder)) => placeholder.as_str(),
                (true, None) => "",
            };
            out.push_str(&format!("  ✎ {shown}\n"));
        }
        InputView::SingleSelect { options } => render_options(out, options, "(•)", "( )"),
        InputView::MultiSelect { options } => render_options(out, options, "[x]", "[ ]"),
    }

    if let Some(other) = &panel.other {
        let shown = if other.value.is_empty() {
            other.placeholder
        } else {
            other.value.as_str()
        };
        out.push_str(&format!("  Other: {shown}\n"));
    }
    if let Some(error) = &panel.error {
        out.push_str(&format!("  ! {error}\n"));
    }

    let mut controls = Vec::new();
    if panel.show_back {
        controls.push("/back".to_string());
    }
    if let Some(next) = panel.next {
        controls.push(if next.enabled {
            "/next".to_string()
        } else {
            "/next (answer first)".to_string()
        });
    }
    if !controls.is_empty() {
        out.push_str(&format!("\n  {}\n", controls.join("   ")));
    }
}

fn render_options(out: &mut String, options: &[OptionView], on: &str, off: &str) {
    for (i, option) in options.iter().enumerate() {
        let mark = if option.selected { on } else { off };
        out.push_str(&format!("  {:>2}. {mark} {}\n", i + 1, option.label));
    }
}

fn render_completion(done: &CompletionScreen) -> String {
    format!(
        "\n  ✓ {}\n\n{}\n\n  [ {} ]\n\n{}\n",
        done.title, done.message, done.call_to_action, done.footnote
    )
}

/// Interpret one line against the screen it answers. `None` when the line
/// means nothing there.
///
/// Commands and option picks are matched on the trimmed line; free text is
/// passed through as typed.
pub fn parse_line(screen: &Screen, raw: &str) -> Option<SurfaceInput> {
    let line = raw.trim();
    match line {
        "/quit" => return Some(SurfaceInput::Quit),
        "/back" => return Some(SurfaceInput::Events(vec![CardEvent::Back])),
        "/next" => return Some(SurfaceInput::Events(vec![CardEvent::Next])),
        _ => {}
    }

    let Screen::Question { card, .. } = screen else {
        return None;
    };
    let events = match card {
        CardView::Intro(_) => match line {
            "" | "start" => vec![CardEvent::Start],
            _ => return None,
        },
        CardView::Question(panel) => match &panel.input {
            InputView::Text { .. } => {
                vec![CardEvent::Input(raw.to_string()), CardEvent::Next]
            }
            InputView::SingleSelect { options } => match pick(options, line) {
                Some(value) => vec![CardEvent::Select(value)],
                None if panel.other.is_some() && !line.is_empty() => {
                    vec![CardEvent::InputOther(raw.to_string()), CardEvent::Next]
                }
                None => return None,
            },
            InputView::MultiSelect { options } => {
                let picks: Option<Vec<String>> = line
                    .split([',', ' '])
                    .filter(|s| !s.is_empty())
                    .map(|token| pick(options, token))
                    .collect();
                match picks {
                    Some(values) if !values.is_empty() => {
                        values.into_iter().map(CardEvent::Toggle).collect()
                    }
                    _ => return None,
                }
            }
        },
    };
    Some(SurfaceInput::Events(events))
}

/// Resolve a 1-based option number or an option value.
fn pick(options: &[OptionView], token: &str) -> Option<String> {
    if let Ok(n) = token.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| options.get(i))
            .map(|o| o.value.clone());
    }
    options
        .iter()
        .find(|o| o.value == token)
        .map(|o| o.value.clone())
}

fn input_hint(screen: &Screen) -> &'static str {
    match screen {
        Screen::Question {
            card: CardView::Intro(_),
            ..
        } => "Press Enter to start, or /quit.",
        Screen::Question {
            card: CardView::Question(panel),
            ..
        } => match panel.input {
            InputView::Text { .. } => "Type your answer and press Enter.",
            InputView::SingleSelect { .. } => "Pick an option by number.",
            InputView::MultiSelect { .. } => "Toggle options by number (e.g. 1 3), then /next.",
        },
        _ => "Type /quit to leave.",
    }
}

fn unavailable_hint(screen: &Screen) -> &'static str {
    match screen {
        Screen::Question {
            card: CardView::Question(panel),
            ..
        } => match (&panel.input, panel.next) {
            (InputView::Text { .. }, _) => "Enter an answer to continue.",
            (InputView::MultiSelect { .. }, _) => "Pick at least one option first.",
            (InputView::SingleSelect { .. }, Some(_)) => "Tell us a bit more first.",
            (InputView::SingleSelect { .. }, None) => "Pick an option to continue.",
        },
        _ => "That isn't available right now.",
    }
}
