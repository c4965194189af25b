pub mod history;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph, Widget},
};
use restwatch::{
    config::Config,
    format::{format_secs, TimeFormat},
    stats::WorkoutSummary,
    Phase,
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 2;
const BAR_WIDTH: u16 = 5;
const BAR_GAP: u16 = 1;

/// How the rest timer should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestUrgency {
    Normal,
    Warning,
    Alert,
    Paused,
}

impl RestUrgency {
    fn color(self) -> Color {
        match self {
            RestUrgency::Normal => Color::White,
            RestUrgency::Warning => Color::Rgb(230, 126, 34),
            RestUrgency::Alert | RestUrgency::Paused => Color::Red,
        }
    }
}

pub fn rest_urgency(rest_secs: u32, paused: bool, config: &Config) -> RestUrgency {
    if paused {
        RestUrgency::Paused
    } else if rest_secs >= config.rest_alert_secs {
        RestUrgency::Alert
    } else if rest_secs >= config.rest_warning_secs {
        RestUrgency::Warning
    } else {
        RestUrgency::Normal
    }
}

fn stat_block<'a>(title: &'a str, value: String, style: Style) -> Paragraph<'a> {
    Paragraph::new(Span::styled(value, style))
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let workout = self.session.workout();
        let readout = self.session.readout();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(3), // counters
                Constraint::Length(5), // sensor
                Constraint::Min(3),    // rest history
                Constraint::Length(1), // summary
                Constraint::Length(1), // feedback
                Constraint::Length(1), // legend
            ])
            .split(area);

        // header
        let phase_color = match workout.phase() {
            Phase::Idle => Color::Gray,
            Phase::Active => Color::Green,
            Phase::Paused => Color::Red,
        };
        let mut header = vec![
            Span::styled("restwatch  ", bold_style.fg(Color::Cyan)),
            Span::styled(workout.phase().to_string(), bold_style.fg(phase_color)),
        ];
        if let Some(started_at) = self.started_at {
            header.push(Span::styled(
                format!("  started {}", started_at.format("%H:%M")),
                dim_style,
            ));
        }
        Paragraph::new(Line::from(header)).render(chunks[0], buf);

        // counters
        let counters = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 5); 5])
            .split(chunks[1]);

        let urgency = rest_urgency(workout.rest_secs(), workout.is_paused(), &self.config);
        let best = workout
            .best_time()
            .map(|b| format_secs(b, TimeFormat::Interval))
            .unwrap_or_else(|| "--".to_string());

        stat_block("Sets", workout.sets_count().to_string(), bold_style).render(counters[0], buf);
        stat_block(
            "Rest",
            format_secs(workout.rest_secs(), TimeFormat::Interval),
            bold_style.fg(urgency.color()),
        )
        .render(counters[1], buf);
        stat_block(
            "Total Rest",
            format_secs(workout.total_rest_secs(), TimeFormat::Interval),
            bold_style,
        )
        .render(counters[2], buf);
        stat_block(
            "Total Time",
            format_secs(workout.total_secs(), TimeFormat::TotalWorkout),
            bold_style,
        )
        .render(counters[3], buf);
        stat_block("Best", best, bold_style.fg(Color::Green)).render(counters[4], buf);

        // sensor
        let sensor_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[2]);

        let (switch_label, switch_color) = if readout.enabled {
            ("Sensor: ON", Color::Green)
        } else {
            ("Sensor: OFF", Color::Red)
        };
        let depth_percent = readout.depth_percent.round().clamp(0.0, 100.0) as u16;
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Depth"))
            .gauge_style(Style::default().fg(switch_color))
            .percent(depth_percent)
            .render(sensor_chunks[0], buf);

        let sensor_lines = vec![
            Line::from(Span::styled(switch_label, bold_style.fg(switch_color))),
            Line::from(format!(
                "accuracy {}%   precision {}%",
                readout.accuracy, readout.precision
            )),
            Line::from(format!("range {:.1}m", readout.range_m)),
        ];
        Paragraph::new(sensor_lines)
            .block(Block::default().borders(Borders::ALL).title("Sensor"))
            .render(sensor_chunks[1], buf);

        // rest history
        let history_area = chunks[3];
        let max_bars = (history_area.width.saturating_sub(2) / (BAR_WIDTH + BAR_GAP)) as usize;
        let bars: Vec<Bar> = history::recent_rests(workout.set_times(), max_bars)
            .into_iter()
            .map(|(number, rest)| {
                Bar::default()
                    .value(u64::from(rest))
                    .label(Line::from(format!("#{number}")))
                    .text_value(format_secs(rest, TimeFormat::Interval))
            })
            .collect();
        BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Rest per set"))
            .bar_width(BAR_WIDTH)
            .bar_gap(BAR_GAP)
            .bar_style(Style::default().fg(Color::Magenta))
            .data(BarGroup::default().bars(&bars))
            .render(history_area, buf);

        // summary
        let summary = WorkoutSummary::from(workout);
        let summary_text = match (summary.mean_rest, summary.rest_std_dev, summary.longest_rest) {
            (Some(mean), Some(sd), Some(longest)) => format!(
                "avg rest {}   sd {:.1}s   longest {}",
                format_secs(mean.round() as u32, TimeFormat::Interval),
                sd,
                format_secs(longest, TimeFormat::Interval)
            ),
            _ => "no sets yet".to_string(),
        };
        Paragraph::new(Span::styled(summary_text, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        // feedback
        if let Some(banner) = &self.banner {
            let color = if banner.feedback.is_warning {
                Color::Yellow
            } else {
                Color::Green
            };
            Paragraph::new(Span::styled(
                banner.feedback.message.as_str(),
                bold_style.fg(color),
            ))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
        }

        // legend; the set key pulses once rest runs long
        let set_key_style = if urgency == RestUrgency::Alert {
            bold_style.fg(Color::Red).add_modifier(Modifier::SLOW_BLINK)
        } else {
            italic_style
        };
        let start_or_pause = if workout.is_started() {
            if workout.is_paused() {
                "(p) resume"
            } else {
                "(p)ause"
            }
        } else {
            "(s)tart"
        };
        let legend = Line::from(vec![
            Span::styled(format!("{start_or_pause} / "), italic_style),
            Span::styled("(enter) set", set_key_style),
            Span::styled(
                " / (r)eset / (t) sensor / (h)elp / (a)bout / (q)uit",
                italic_style,
            ),
        ]);
        Paragraph::new(legend)
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
    }
}
