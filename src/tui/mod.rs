//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};

use crate::session::Session;
use crate::units::{display_height, display_weight};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const RECENT_WORKOUTS: usize = 20;

/// App state for TUI
pub struct App {
    session: Session,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            should_quit: false,
        }
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;
        let result = self.event_loop(&mut terminal);
        finish(result, restore_terminal)
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(7),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header = Paragraph::new("MetaFit - Level up your training")
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        frame.render_widget(self.profile_panel(), panels[0]);
        frame.render_widget(self.summary_panel(), panels[1]);
        frame.render_widget(self.level_gauge(), chunks[2]);
        frame.render_widget(self.workout_table(), chunks[3]);

        // Footer
        let footer = Paragraph::new("q: quit | r: reload")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[4]);
    }

    fn profile_panel(&self) -> Paragraph<'static> {
        let block = Block::default().borders(Borders::ALL).title("Profile");
        let Some(user) = self.session.user() else {
            return Paragraph::new("No profile yet. Run `metafit init` to create one.").block(block);
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(user.name.clone(), Style::default().bold()),
                Span::raw(format!(", {} y.o.", user.age)),
            ]),
            Line::from(format!(
                "{} | {}",
                display_height(user.height_cm, user.unit_system),
                display_weight(user.weight_kg, user.unit_system)
            )),
            Line::from(format!("BMI {:.1} ({})", user.bmi(), user.bmi_category())),
            Line::from(format!(
                "{} workouts | {:.0} kcal total",
                user.total_workouts(),
                user.total_calories_burned()
            )),
        ];
        Paragraph::new(lines).block(block)
    }

    fn summary_panel(&self) -> Paragraph<'static> {
        let week = self.session.weekly_summary();
        let month = self.session.monthly_summary();
        let streak = self.session.streak_days();

        let lines = vec![
            Line::from(format!(
                "This week:  {} workouts, {:.0} kcal, {} XP",
                week.workouts, week.calories_burned, week.xp_earned
            )),
            Line::from(format!(
                "This month: {} workouts, {:.0} kcal, {} XP",
                month.workouts, month.calories_burned, month.xp_earned
            )),
            Line::from(Span::styled(
                format!("{} day streak", streak),
                Style::default().fg(Color::Yellow),
            )),
        ];
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Summary"))
    }

    fn level_gauge(&self) -> Gauge<'static> {
        let (title, ratio, label) = match self.session.user() {
            Some(user) => {
                let progress = user.level_progress();
                (
                    format!("Level {}", progress.level),
                    progress.progress.clamp(0.0, 1.0),
                    format!(
                        "{} / {} XP to level {}",
                        user.xp_points() - progress.xp_for_current_level,
                        progress.xp_to_next_level,
                        progress.level + 1
                    ),
                )
            }
            None => ("Level".to_string(), 0.0, String::new()),
        };

        Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(ratio)
            .label(label)
    }

    fn workout_table(&self) -> Table<'static> {
        let rows: Vec<Row> = self
            .session
            .stats()
            .recent(RECENT_WORKOUTS)
            .into_iter()
            .map(|w| {
                Row::new(vec![
                    Cell::from(w.date.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string()),
                    Cell::from(w.name.clone()),
                    Cell::from(w.exercises().len().to_string()),
                    Cell::from(format!("{:.0} min", w.total_duration() / 60.0)),
                    Cell::from(format!("{:.0}", w.total_calories_burned())),
                    Cell::from(format!("+{}", w.xp_earned())),
                ])
            })
            .collect();

        Table::new(
            rows,
            [
                Constraint::Length(17),
                Constraint::Min(16),
                Constraint::Length(9),
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Length(7),
            ],
        )
        .header(
            Row::new(vec!["Date", "Workout", "Exercises", "Duration", "kcal", "XP"])
                .style(Style::default().bold()),
        )
        .block(Block::default().borders(Borders::ALL).title("Recent workouts"))
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                        KeyCode::Char('r') => self.session.reload()?,
                        _ => {}
                    }
                }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Always restore, then report the loop error ahead of a restore error
fn finish(result: Result<()>, restore: impl FnOnce() -> Result<()>) -> Result<()> {
    let restored = restore();
    result?;
    restored
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use ratatui::backend::TestBackend;

    use crate::db::Database;
    use crate::models::User;
    use crate::units::UnitSystem;

    #[test]
    fn test_loop_error_still_restores() {
        let mut restored = false;
        let result = finish(Err(anyhow!("draw failed")), || {
            restored = true;
            Ok(())
        });
        assert!(restored);
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }

    #[test]
    fn test_restore_error_reported_after_clean_loop() {
        let result = finish(Ok(()), || Err(anyhow!("restore failed")));
        assert_eq!(result.unwrap_err().to_string(), "restore failed");
    }

    #[test]
    fn test_dashboard_renders_profile() {
        let mut session = Session::open(Database::open_in_memory().unwrap()).unwrap();
        session
            .create_user(User::new("Alex", 30, 175.0, 70.0, UnitSystem::Metric))
            .unwrap();
        let app = App::new(session);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("MetaFit"));
        assert!(screen.contains("Alex"));
        assert!(screen.contains("Level 1"));
    }
}
