//! # Docs Screen
//!
//! Bundled trading guides with level filter and search, an article reader
//! and the list of published tutorials. Readable without signing in.

use shared::format_timestamp;

use crate::app::{App, AppState, DocsState, Screen};
use crate::services::docs::{self, DocArticle, DocLevel, DocSection};
use crate::ui::theme::Theme;
use crate::ui::widgets::tables;

/// Articles matching the level filter and a case-insensitive search over
/// title, excerpt and tags.
pub fn filter_docs<'a>(all: &'a [DocArticle], filter: &DocsState) -> Vec<&'a DocArticle> {
    let needle = filter.search.trim().to_lowercase();
    all.iter()
        .filter(|doc| filter.level_filter.map_or(true, |level| doc.level == level))
        .filter(|doc| {
            needle.is_empty()
                || doc.title.to_lowercase().contains(&needle)
                || doc.excerpt.to_lowercase().contains(&needle)
                || doc.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App) {
    let theme = Theme::default();

    if !state.is_authenticated() {
        ui.horizontal(|ui| {
            if ui.link("← Back to sign in").clicked() {
                app.handle_screen_change(Screen::Login);
            }
        });
    }

    let selected = state.docs.selected_slug.as_deref().and_then(docs::find_doc_by_slug);
    egui::ScrollArea::vertical().show(ui, |ui| match selected {
        Some(article) => render_article(ui, article, app, &theme),
        None => render_index(ui, state, app, &theme),
    });
}

fn level_color(level: DocLevel, theme: &Theme) -> egui::Color32 {
    match level {
        DocLevel::Beginner => theme.success,
        DocLevel::Intermediate => theme.warning,
        DocLevel::Advanced => theme.error,
    }
}

fn render_index(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    ui.heading("Learn to Trade");
    ui.colored_label(theme.dim, "Guides on markets, risk and strategy.");
    ui.add_space(8.0);

    let mut filter = state.docs.clone();
    ui.horizontal(|ui| {
        ui.selectable_value(&mut filter.level_filter, None, "All levels");
        for level in DocLevel::ALL {
            ui.selectable_value(&mut filter.level_filter, Some(level), level.to_string());
        }
        ui.add_space(12.0);
        ui.add(egui::TextEdit::singleline(&mut filter.search).hint_text("Search guides").desired_width(200.0));
    });
    if filter != state.docs {
        let mut state = app.state.write();
        state.docs.level_filter = filter.level_filter;
        state.docs.search = filter.search.clone();
    }

    ui.add_space(8.0);
    let matches = filter_docs(docs::all_docs(), &filter);
    if matches.is_empty() {
        tables::render_empty_state(ui, "No guides match your search", None, theme);
    }

    let mut open: Option<String> = None;
    for doc in matches {
        egui::Frame::group(ui.style()).fill(theme.card).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                if ui.link(egui::RichText::new(&doc.title).size(16.0).strong()).clicked() {
                    open = Some(doc.slug.clone());
                }
                ui.colored_label(level_color(doc.level, theme), doc.level.to_string());
                ui.colored_label(theme.dim, format!("{} min read", doc.reading_minutes()));
            });
            ui.label(&doc.excerpt);
            if !doc.tags.is_empty() {
                ui.colored_label(theme.dim, doc.tags.join(" · "));
            }
        });
    }
    if let Some(slug) = open {
        app.select_doc(Some(slug));
    }

    let tutorials = docs::published_tutorials();
    if !tutorials.is_empty() {
        ui.add_space(16.0);
        ui.label(egui::RichText::new("Tutorials").size(18.0).strong());
        tables::render_table(
            ui,
            "tutorials",
            tables::TableConfig { num_columns: 4, ..Default::default() },
            &["Title", "Category", "Level", "Duration"],
            theme,
            |ui| {
                for tutorial in tutorials {
                    ui.label(&tutorial.title).on_hover_text(&tutorial.description);
                    ui.label(&tutorial.category);
                    ui.label(tutorial.difficulty.to_string());
                    ui.label(format!("{} min", tutorial.duration_minutes));
                    ui.end_row();
                }
            },
        );
    }
}

fn render_article(ui: &mut egui::Ui, article: &DocArticle, app: &mut App, theme: &Theme) {
    if ui.link("← All guides").clicked() {
        app.select_doc(None);
    }
    ui.add_space(6.0);
    ui.label(egui::RichText::new(&article.title).size(26.0).strong());
    ui.horizontal(|ui| {
        ui.colored_label(level_color(article.level, theme), article.level.to_string());
        ui.colored_label(theme.dim, format!("{} min read", article.reading_minutes()));
        ui.colored_label(theme.dim, format!("Updated {}", format_timestamp(&article.updated_at)));
    });
    ui.add_space(10.0);

    for (index, section) in article.sections.iter().enumerate() {
        render_section(ui, index, section, theme);
        ui.add_space(6.0);
    }
}

fn render_section(ui: &mut egui::Ui, index: usize, section: &DocSection, theme: &Theme) {
    match section {
        DocSection::Heading { level, text } => {
            let size = match level {
                1 => 22.0,
                2 => 19.0,
                _ => 16.0,
            };
            ui.add_space(4.0);
            ui.label(egui::RichText::new(text).size(size).strong());
        }
        DocSection::Paragraph { text } => {
            ui.label(text);
        }
        DocSection::List { items } => {
            for item in items {
                ui.horizontal_wrapped(|ui| {
                    ui.label("•");
                    ui.label(item);
                });
            }
        }
        DocSection::Code { language, content } => {
            egui::Frame::group(ui.style())
                .fill(ui.visuals().extreme_bg_color)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    if let Some(language) = language {
                        ui.colored_label(theme.dim, language);
                    }
                    ui.monospace(content);
                });
        }
        DocSection::Table { headers, rows } => {
            egui::Grid::new(("doc_table", index))
                .striped(true)
                .num_columns(headers.len())
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for header in headers {
                        ui.label(egui::RichText::new(header).strong());
                    }
                    ui.end_row();
                    for row in rows {
                        for cell in row {
                            ui.label(cell);
                        }
                        ui.end_row();
                    }
                });
        }
        DocSection::Image { src, alt, caption, .. } => {
            // Remote images are not fetched; show the description and link instead.
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.colored_label(theme.dim, format!("[image] {}", alt));
                ui.hyperlink_to(src, src);
                if let Some(caption) = caption {
                    ui.label(egui::RichText::new(caption).italics());
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_by_level_and_search() {
        let all = docs::all_docs();
        let everything = filter_docs(all, &DocsState::default());
        assert_eq!(everything.len(), all.len());

        let beginner = filter_docs(
            all,
            &DocsState { level_filter: Some(DocLevel::Beginner), ..Default::default() },
        );
        assert!(beginner.iter().all(|d| d.level == DocLevel::Beginner));
        assert!(!beginner.is_empty());

        let risk = filter_docs(all, &DocsState { search: "  RISK ".to_string(), ..Default::default() });
        assert!(risk.iter().any(|d| d.slug == "risk-management-strategies"));

        let none = filter_docs(all, &DocsState { search: "zzzz-no-match".to_string(), ..Default::default() });
        assert!(none.is_empty());
    }
}
