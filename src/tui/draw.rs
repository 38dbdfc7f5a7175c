use crate::simulation::engine::{BlockReason, StepOutcome};
use crate::tui::app::App;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::Color::White;
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Padding, Row, Table};

pub fn draw_app(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(5),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);

    frame.render_widget(build_header(app), chunks[0]);
    frame.render_widget(build_status(app), chunks[1]);
    frame.render_widget(build_edge_table(app), body[0]);
    frame.render_widget(build_request_table(app), body[1]);
}

fn util_style(utilization: f64) -> Style {
    if utilization < 0.5 {
        Style::default().fg(Color::Green)
    } else if utilization < 1.0 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Red)
    }
}

fn build_header(app: &'_ App) -> Block<'_> {
    let engine = &app.engine;
    let report = engine.report();
    let dim = Style::default().add_modifier(Modifier::DIM);

    Block::new()
        .title(Line::from(vec![
            Span::raw(" Widegraph ").style(Style::default().bold().cyan()),
            Span::raw("|").style(dim),
            Span::raw(" Step: ").style(dim),
            Span::raw(format!(
                "{}/{}",
                engine.current_step(),
                engine.config().connection_count()
            ))
            .style(Style::default().bold()),
            Span::raw(" Hold: ").style(dim),
            Span::raw(format!("{}", engine.config().hold_time())).style(Style::default().bold()),
            Span::raw(" Blocked: ").style(dim),
            Span::raw(format!(
                "{} ({:.2}%)",
                report.blocked(),
                report.blocking_rate() * 100.0
            ))
            .style(Style::default().bold()),
            Span::raw(" No path: ").style(dim),
            Span::raw(format!("{}", report.no_path())).style(Style::default().bold()),
            Span::raw(" "),
        ]))
        .title_alignment(Alignment::Center)
}

fn build_status(app: &'_ App) -> Line<'_> {
    match app.error() {
        Some(e) => Line::from(Span::raw(format!(" error: {e}")).red().bold()),
        None if app.engine.is_finished() => {
            Line::from(Span::raw(" run complete, q to quit").add_modifier(Modifier::DIM))
        }
        None => Line::from(
            Span::raw(format!(
                " space: step   r: {} steps   q: quit   in flight: {}",
                App::BURST,
                app.engine.in_flight()
            ))
            .add_modifier(Modifier::DIM),
        ),
    }
}

fn build_edge_table(app: &'_ App) -> Table<'_> {
    let graph = app.engine.graph();

    Table::new(
        graph.edges().iter().map(|edge| {
            let utilization = if edge.initial_capacity() > 0 {
                edge.in_use() as f64 / edge.initial_capacity() as f64
            } else {
                1.0
            };
            let state = app.engine.edge_state(edge.id());

            Row::new(vec![
                Cell::from(edge.label().to_owned()),
                Cell::from(format!("{:>3}/{:<3}", edge.capacity(), edge.initial_capacity())),
                Cell::from(format!("{:>6.2}", utilization)).style(util_style(utilization)),
                Cell::from(format!("{:>6}", state.in_flight())),
                Cell::from(format!("{:>8}", state.reserved())),
            ])
        }),
        [
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new([
            Cell::from("Link"),
            Cell::from("Free/Cap"),
            Cell::from(" Util"),
            Cell::from(" Calls"),
            Cell::from("   Total"),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Links ").style(Style::default().bold()),
            ]))
            .padding(Padding::horizontal(1)),
    )
}

fn build_request_table(app: &'_ App) -> Table<'_> {
    let graph = app.engine.graph();

    Table::new(
        app.recent().iter().map(|outcome| match outcome {
            StepOutcome::Admitted {
                source,
                destination,
                path,
                bottleneck,
            } => Row::new(vec![
                Cell::from(format!("{source} -> {destination}")),
                Cell::from("admitted").style(Style::default().green()),
                Cell::from(format!("{:>4}", bottleneck)),
                Cell::from(path.describe(graph)),
            ]),
            StepOutcome::Blocked {
                source,
                destination,
                reason,
            } => Row::new(vec![
                Cell::from(format!("{source} -> {destination}")),
                Cell::from(match reason {
                    BlockReason::NoPath => "no path",
                    BlockReason::NoCapacity => "full",
                })
                .style(Style::default().red()),
                Cell::from("   -"),
                Cell::from(""),
            ]),
        }),
        [
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new([
            Cell::from("Request"),
            Cell::from("Outcome"),
            Cell::from("Width"),
            Cell::from("Route"),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Requests ").style(Style::default().bold()),
            ]))
            .padding(Padding::horizontal(1)),
    )
}
