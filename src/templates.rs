use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    csrf,
    forms::FieldErrors,
    models::Movie,
    tmdb::{self, SearchCandidate},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn index_page(movies: &[Movie]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet. Add one to get started." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page(title: &str, csrf_token: &str, errors: &FieldErrors) -> String {
    page(
        "Add Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }
                        (form_errors(errors))

                        form class="mt-8 space-y-6" method="post" action="/add" {
                            input type="hidden" name=(csrf::FIELD) value=(csrf_token);
                            div {
                                label class="block text-sm font-medium text-gray-700" for="title" { "Movie Title" }
                                input class=(INPUT_CLASS) name="title" id="title" value=(title) required;
                                (field_errors(errors, "title"))
                            }
                            button class=(BUTTON_CLASS) type="submit" { "Add Movie" }
                        }
                    }
                }
            }
        },
    )
}

pub fn select_page(query: &str, candidates: &[SearchCandidate], image_base_url: &str) -> String {
    page(
        "Select Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        div class="flex items-start justify-between gap-6" {
                            div {
                                h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                                p class="mt-2 text-gray-600" { "Results for \"" (query) "\"" }
                            }
                            a class="text-sm text-blue-600 hover:text-blue-800" href="/add" { "New search" }
                        }

                        @if candidates.is_empty() {
                            p class="mt-8 text-gray-600" { "No movies found." }
                        } @else {
                            ul class="mt-8 divide-y divide-gray-200" {
                                @for candidate in candidates {
                                    li class="py-3 flex gap-4" {
                                        @if let Some(src) = tmdb::poster_url(image_base_url, candidate.poster_path.as_deref()) {
                                            img class="w-12 rounded" src=(src) alt=(candidate.title);
                                        }
                                        div {
                                            a class="text-blue-600 hover:text-blue-800" href=(format!("/find?id={}", candidate.id)) {
                                                (candidate.title)
                                                @if let Some(date) = candidate.release_date.as_deref().filter(|d| !d.is_empty()) {
                                                    span class="ml-2 text-gray-500" { "- " (date) }
                                                }
                                            }
                                            @if let Some(overview) = &candidate.overview {
                                                p class="mt-1 text-sm text-gray-600 line-clamp-2" { (overview) }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn edit_page(
    movie: &Movie,
    rating: &str,
    review: &str,
    csrf_token: &str,
    errors: &FieldErrors,
) -> String {
    page(
        "Edit Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                        p class="mt-2 text-gray-600" { "Edit Movie Rating" }
                        (form_errors(errors))

                        form class="mt-8 space-y-6" method="post" action=(format!("/edit?id={}", movie.id)) {
                            input type="hidden" name=(csrf::FIELD) value=(csrf_token);
                            div {
                                label class="block text-sm font-medium text-gray-700" for="rating" { "Your rating out of 10, e.g. 7.5" }
                                input class=(INPUT_CLASS) name="rating" id="rating" type="number" min="0" max="10" step="0.1" value=(rating) required;
                                (field_errors(errors, "rating"))
                            }
                            div {
                                label class="block text-sm font-medium text-gray-700" for="review" { "Your review" }
                                input class=(INPUT_CLASS) name="review" id="review" maxlength="250" value=(review) required;
                                (field_errors(errors, "review"))
                            }
                            button class=(BUTTON_CLASS) type="submit" { "Done" }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error " (status.as_u16()) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn movie_card(movie: &Movie) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            @if !movie.img_url.is_empty() {
                img class="w-24 rounded" src=(movie.img_url) alt=(movie.title);
            }
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        @if let Some(ranking) = movie.ranking {
                            span class="mr-2 text-gray-400" { "#" (ranking) }
                        }
                        (movie.title)
                        span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                    }
                    @if let Some(rating) = movie.rating {
                        span class="text-lg font-semibold text-yellow-600" { (format!("{rating:.1}")) }
                    }
                }
                @if let Some(review) = &movie.review {
                    p class="mt-2 italic text-gray-700" { "\"" (review) "\"" }
                }
                p class="mt-2 text-sm text-gray-600" { (movie.description) }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                }
            }
        }
    }
}

fn form_errors(errors: &FieldErrors) -> Markup {
    html! {
        @for message in errors.for_field(csrf::FIELD) {
            p class="mt-4 rounded-md bg-red-50 px-3 py-2 text-sm text-red-700" { (message) }
        }
    }
}

fn field_errors(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @for message in errors.for_field(field) {
            p class="mt-2 text-sm text-red-600" { (message) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Movie {
        Movie {
            id: 3,
            title: "Heat <1995>".to_string(),
            year: 1995,
            description: "Cops & robbers.".to_string(),
            rating: Some(8.0),
            ranking: Some(1),
            review: Some("Great".to_string()),
            img_url: "https://img/heat.jpg".to_string(),
        }
    }

    #[test]
    fn listing_escapes_and_links_actions() {
        let html = index_page(&[movie()]);
        assert!(html.contains("Heat &lt;1995&gt;"));
        assert!(html.contains("Cops &amp; robbers."));
        assert!(html.contains("href=\"/edit?id=3\""));
        assert!(html.contains("href=\"/delete?id=3\""));
        assert!(html.contains("#1"));
        assert!(html.contains("8.0"));
    }

    #[test]
    fn field_errors_render_inline() {
        let mut errors = FieldErrors::default();
        errors.push("rating", "Number must be between 0.0 and 10.0.");
        let html = edit_page(&movie(), "11", "", "tok", &errors);
        assert!(html.contains("Number must be between 0.0 and 10.0."));
        assert!(html.contains("value=\"11\""));
        assert!(html.contains("name=\"csrf_token\" value=\"tok\""));
    }

    #[test]
    fn select_links_to_find() {
        let candidates = vec![SearchCandidate {
            id: 27205,
            title: "Inception".to_string(),
            release_date: Some("2010-07-15".to_string()),
            poster_path: None,
            overview: None,
        }];
        let html = select_page("Inception", &candidates, "https://img");
        assert!(html.contains("href=\"/find?id=27205\""));
        assert!(html.contains("2010-07-15"));
        assert!(!html.contains("<img"));
    }
}
