use maud::{DOCTYPE, Markup, html};

use crate::{entities::movie, models::Movie};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(movies: &[movie::Model]) -> String {
    page(
        "Movie Ratings",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Movie Ratings" }
                        p class="mt-2 text-gray-600" { "Search the catalog and rate what you've watched." }

                        form class="mt-8 flex gap-3" method="get" action="/search" {
                            input class="flex-1 rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" type="text" name="query" placeholder="Search for a movie" required;
                            button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
                        }
                    }

                    @if movies.is_empty() {
                        div class="mt-8 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies rated yet." }
                        }
                    } @else {
                        div class="mt-8 space-y-4" {
                            @for movie in movies {
                                (rated_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn search_page(query: &str, movies: &[Movie]) -> String {
    page(
        "Search Results",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "Search results" }
                            p class="mt-2 text-gray-600" { "Showing matches for \"" (query) "\"" }
                        }
                        a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to your list" }
                    }

                    @if movies.is_empty() {
                        div class="mt-8 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No results found." }
                        }
                    } @else {
                        div class="mt-8 space-y-4" {
                            @for movie in movies {
                                (result_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
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

fn rated_card(movie: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-5" {
            @if let Some(poster) = &movie.poster_path {
                img class="w-20 rounded" src=(poster) alt=(movie.title);
            }
            div {
                h2 class="text-xl font-semibold text-gray-900" {
                    (movie.title)
                    @if let Some(year) = &movie.year {
                        span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                    }
                }
                p class="mt-2 text-yellow-500" title=(format!("{}/5", movie.rating)) {
                    ("★".repeat(movie.rating as usize))
                    span class="text-gray-300" { ("★".repeat(5usize.saturating_sub(movie.rating as usize))) }
                }
            }
        }
    }
}

fn result_card(movie: &Movie) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-5" {
            @if let Some(poster) = &movie.poster_path {
                img class="w-20 rounded" src=(poster) alt=(movie.title);
            }
            div class="flex-1" {
                h2 class="text-xl font-semibold text-gray-900" {
                    (movie.title)
                    @if let Some(year) = &movie.year {
                        span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                    }
                }

                form class="mt-4 flex items-center gap-3" method="post" action="/add-movie" {
                    input type="hidden" name="movie_id" value=(movie.id);
                    input type="hidden" name="title" value=(movie.title);
                    @if let Some(year) = &movie.year {
                        input type="hidden" name="year" value=(year);
                    }
                    @if let Some(poster) = &movie.poster_path {
                        input type="hidden" name="poster_path" value=(poster);
                    }
                    select class="rounded-md border border-gray-300 px-2 py-1" name="rating" {
                        @for rating in 1..=5 {
                            option value=(rating) { (rating) }
                        }
                    }
                    button class="rounded-md bg-blue-600 px-4 py-1.5 font-semibold text-white hover:bg-blue-700" type="submit" { "Add" }
                }
            }
        }
    }
}
