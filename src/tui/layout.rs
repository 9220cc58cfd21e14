//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, Paragraph};

use super::runtime::App;
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // chart
            Constraint::Length(3), // capacity factor gauge
            Constraint::Length(5), // status panel
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
    render_cf_gauge(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_footer(frame, chunks[4]);
}

/// Header bar: run label, selected turbine, replay progress and state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (state_icon, state_label) = if app.is_finished() {
        ("■", "DONE")
    } else if app.paused {
        ("‖", "PAUSED")
    } else {
        ("▶", "REPLAY")
    };

    let turbine = app.selected().map_or_else(
        || "no turbines".to_string(),
        |(r, spec, _)| {
            format!(
                "turbine {}/{} {} ({:.2}, {:.2})",
                r.turbine_id + 1,
                app.turbine_count(),
                spec.model(),
                r.site.latitude,
                r.site.longitude
            )
        },
    );

    let header = Line::from(vec![
        Span::styled(
            " WIND-YIELD ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(&app.label, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            " │ {turbine} │ t={}/{} │ {}ms │ {state_icon} {state_label} ",
            app.cursor,
            app.total_steps,
            app.tick_interval_ms(),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Output power (and optionally input power) against the rated-power line.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let records = app.visible_records();
    let rated = app.selected().map_or(0.0, |(_, spec, _)| spec.rated_power_kw());

    let output_data: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (r.index as f64, r.output_power_kw))
        .collect();
    let input_data: Vec<(f64, f64)> = if app.show_input {
        records
            .iter()
            .map(|r| (r.index as f64, r.input_power_kw))
            .collect()
    } else {
        Vec::new()
    };

    let x_lo = output_data.first().map_or(0.0, |p| p.0);
    let x_hi = output_data.last().map_or(1.0, |p| p.0).max(x_lo + 1.0);
    let rated_data = [(x_lo, rated), (x_hi, rated)];

    let y_bounds = style::auto_bounds_y(&[&output_data[..], &input_data[..], &rated_data[..]]);

    let mut datasets = vec![
        Dataset::default()
            .name("Output")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::OUTPUT_COLOR))
            .data(&output_data),
        Dataset::default()
            .name("Rated")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(style::RATED_COLOR))
            .data(&rated_data),
    ];
    if app.show_input {
        datasets.push(
            Dataset::default()
                .name("Input")
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(style::INPUT_COLOR))
                .data(&input_data),
        );
    }

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Turbine Power ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("step")
                .bounds([x_lo, x_hi])
                .labels(vec![format!("{}", x_lo as u64), format!("{}", x_hi as u64)]),
        )
        .y_axis(
            Axis::default()
                .title("kW")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.0}", y_bounds[0]),
                    format!("{:.0}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Capacity factor over the revealed steps, with a cut-out indicator.
fn render_cf_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let cf = app.capacity_factor_so_far();
    let cut_out = app
        .last_record()
        .zip(app.selected())
        .is_some_and(|(r, (_, spec, _))| r.wind_speed_ms > spec.cut_out_speed_ms());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(14)])
        .split(area);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Capacity factor ")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(style::cf_color(cf)))
        .ratio(cf.clamp(0.0, 1.0))
        .label(format!("{:.1}%", cf * 100.0));
    frame.render_widget(gauge, chunks[0]);

    let (text, color) = if cut_out {
        ("CUT-OUT", style::CUT_OUT)
    } else {
        ("", style::FOOTER_FG)
    };
    let indicator = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(indicator, chunks[1]);
}

/// Latest step readings and full-run yield of the selected turbine.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match (app.last_record(), app.selected()) {
        (Some(r), Some((_, _, report))) => vec![
            Line::from(format!(
                "  {}  wind={:>5.2} m/s  rho={:.4} kg/m3  tsr={}",
                r.timestamp.format("%Y-%m-%d %H:%M"),
                r.wind_speed_ms,
                r.air_density_kg_m3,
                r.tip_speed_ratio
                    .map_or_else(|| "-".to_string(), |t| format!("{t:.2}")),
            )),
            Line::from(format!(
                "  in={:>9.2} kW  out={:>8.2} kW",
                r.input_power_kw, r.output_power_kw,
            )),
            Line::from(format!(
                "  run total: {:.2} MWh  CF={:.1}%  park: {:.2} MWh",
                report.energy_mwh,
                report.capacity_factor * 100.0,
                app.park_energy_mwh(),
            )),
        ],
        _ => vec![Line::from("  Waiting for first step...")],
    };

    let block = Block::default().title(" Status ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  +/-:Speed  ←/→/Tab:Turbine  i:Input  r:Restart  End:Skip",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
