use std::{collections::HashSet, sync::Arc};

use axum::{debug_handler, extract::State, response::Html};

use crate::{dataset::Dataset, include_res, res, AppState};

#[debug_handler(state = AppState)]
pub async fn index(State(dataset): State<Arc<Dataset>>) -> Html<String> {
    let categories: String = dataset
        .skill_categories
        .iter()
        .map(|category| {
            include_res!(str, "/pages/category.html")
                .replace("{icon}", &res::escape(&category.icon))
                .replace("{name}", &res::escape(&category.name))
                .replace("{count}", &category.count.to_string())
        })
        .collect();

    let testimonials: String = dataset
        .testimonials
        .iter()
        .map(|testimonial| {
            include_res!(str, "/pages/testimonial.html")
                .replace("{quote}", &res::escape(&testimonial.quote))
                .replace("{avatar}", &res::escape(&testimonial.avatar))
                .replace("{name}", &res::escape(&testimonial.name))
                .replace("{role}", &res::escape(&testimonial.role))
        })
        .collect();

    let skill_count = dataset
        .profiles
        .iter()
        .flat_map(|p| &p.skills_offered)
        .collect::<HashSet<_>>()
        .len();
    let exchange_count: u32 = dataset.profiles.iter().map(|p| p.exchanges).sum();

    let body = include_res!(str, "/pages/index.html")
        .replace("{member_count}", &dataset.profiles.len().to_string())
        .replace("{skill_count}", &skill_count.to_string())
        .replace("{exchange_count}", &exchange_count.to_string())
        .replace("{categories}", &categories)
        .replace("{testimonials}", &testimonials);

    res::page("Trade Skills", None, false, &body)
}
