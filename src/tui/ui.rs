use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};

use crate::app::{App, SubmitStatus, Tab};
use crate::form::FormField;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Tab body
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    render_tab_bar(frame, app, chunks[0]);

    match app.active_tab {
        Tab::Intake => render_intake_tab(frame, app, chunks[1]),
        Tab::Records => render_records_tab(frame, app, chunks[1]),
    }

    render_status_line(frame, app, chunks[2]);

    if app.show_help {
        render_help(frame);
    }
}

fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.label())).collect();

    let tabs = Tabs::new(titles)
        .select(app.active_tab.index())
        .block(
            Block::default()
                .title(" Banfield Pet Hospital Intake ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_intake_tab(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 2), // Form fields
            Constraint::Ratio(1, 2), // Submission outcome
        ])
        .split(area);

    render_form(frame, app, chunks[0]);
    render_submission(frame, app, chunks[1]);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let mut items: Vec<ListItem> = Vec::new();

    items.push(section_header("Pet Details"));
    items.push(field_line(app, FormField::FullName));
    items.push(pet_id_line(app));
    items.push(field_line(app, FormField::DateOfBirth));

    items.push(section_header("Contact Information"));
    items.push(field_line(app, FormField::Phone));
    items.push(field_line(app, FormField::Email));
    items.push(field_line(app, FormField::Address));

    items.push(section_header("Visit Information"));
    items.push(field_line(app, FormField::VisitDate));
    items.push(field_line(app, FormField::Department));
    items.push(field_line(app, FormField::Symptoms));
    items.push(field_line(app, FormField::Allergies));
    items.push(field_line(app, FormField::AdditionalNotes));

    let list = List::new(items).block(
        Block::default()
            .title(" Intake Form ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );

    frame.render_widget(list, area);
}

fn section_header(title: &str) -> ListItem {
    ListItem::new(Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
}

fn field_line<'a>(app: &'a App, field: FormField) -> ListItem<'a> {
    let focused = app.form.focus == field;
    let value = app.form.field_value(field);

    let marker = if focused { "> " } else { "  " };
    let label_style = Style::default().fg(Color::Blue);

    let value_span = if field == FormField::Department {
        let shown = if focused {
            format!("< {value} >")
        } else {
            value.to_string()
        };
        Span::styled(shown, Style::default().fg(Color::White))
    } else if value.is_empty() {
        Span::styled(
            field.placeholder(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(value.to_string(), Style::default().fg(Color::White))
    };

    let mut line = Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{}: ", field.label()), label_style),
        value_span,
    ]);

    if focused {
        line = line.style(Style::default().add_modifier(Modifier::BOLD));
    }

    ListItem::new(line)
}

fn pet_id_line(app: &App) -> ListItem {
    // Generated once per session, read-only
    ListItem::new(Line::from(vec![
        Span::raw("  "),
        Span::styled("Pet ID: ", Style::default().fg(Color::Blue)),
        Span::styled(
            app.form.pet_id.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn render_submission(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match &app.submit_status {
        SubmitStatus::Idle => (
            "Enter Pet details to create a new intake record.\n\nPress Enter to submit the form."
                .to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        SubmitStatus::Submitted(echo) => (
            format!("Pet intake form submitted.\n\n{echo}"),
            Style::default().fg(Color::Green),
        ),
        SubmitStatus::Failed(message) => {
            (message.clone(), Style::default().fg(Color::Red))
        }
    };

    let block = Block::default()
        .title(" Submission ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let paragraph = Paragraph::new(content)
        .style(style)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_records_tab(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Pet Records ({}) ", app.records.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    if let Some(error) = &app.records_error {
        let paragraph = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    if app.records.is_empty() {
        let paragraph = Paragraph::new("No pet records found yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new([
        "ID",
        "Full name",
        "Pet ID",
        "Date of birth",
        "Visit",
        "Department",
        "Created",
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .records
        .iter()
        .map(|record| {
            Row::new([
                Cell::from(record.id.to_string()),
                Cell::from(record.full_name.clone()),
                Cell::from(record.pet_id.clone().unwrap_or_default()),
                Cell::from(record.date_of_birth.to_string()),
                Cell::from(
                    record
                        .visit_date
                        .map(|d| d.to_string())
                        .unwrap_or_default(),
                ),
                Cell::from(record.department.clone().unwrap_or_default()),
                Cell::from(record.created_at.format("%Y-%m-%d %H:%M").to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(16),
            Constraint::Length(15),
            Constraint::Length(13),
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = TableState::default();
    state.select(Some(app.selected_record));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let status = match app.active_tab {
        Tab::Intake => "Tab:next field  Enter:submit  \u{2190}\u{2192}:department  Esc:records  Ctrl+C:quit",
        Tab::Records => "i:intake form  r:reload  j/k:nav  ?:help  q:quit",
    };

    let paragraph = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = vec![
        "",
        " Intake form:",
        "   Tab / ↓     Next field",
        "   Shift+Tab / ↑  Previous field",
        "   ← / →       Cycle department",
        "   Enter       Submit intake form",
        "   Esc         Show records",
        "",
        " Records:",
        "   j / ↓       Move down",
        "   k / ↑       Move up",
        "   r           Reload records",
        "   i / Tab     Back to intake form",
        "",
        " General:",
        "   ?           Toggle this help",
        "   q / Ctrl+C  Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(ratatui::widgets::Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
