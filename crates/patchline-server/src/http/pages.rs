use crate::AppState;
use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use patchline_model::{Post, Service};
use tracing::error;

struct HtmlPage<T: Template> {
    status: StatusCode,
    template: T,
}

impl<T: Template> HtmlPage<T> {
    fn ok(template: T) -> Self {
        Self {
            status: StatusCode::OK,
            template,
        }
    }
}

impl<T: Template> IntoResponse for HtmlPage<T> {
    fn into_response(self) -> Response {
        match self.template.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(e) => {
                error!(error = %e, "template render failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Something went wrong</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }
}

struct CityLink {
    slug: String,
    name: String,
    response_time: String,
}

struct StateSection {
    slug: String,
    name: String,
    abbreviation: String,
    cities: Vec<CityLink>,
}

fn state_sections(state: &AppState) -> Vec<StateSection> {
    state
        .content
        .states()
        .iter()
        .map(|st| StateSection {
            slug: st.slug.to_string(),
            name: st.name.clone(),
            abbreviation: st.abbreviation.clone(),
            cities: state
                .content
                .cities_of(st)
                .into_iter()
                .map(|(slug, city)| CityLink {
                    slug: slug.to_string(),
                    name: city.name.clone(),
                    response_time: city.response_time.clone(),
                })
                .collect(),
        })
        .collect()
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomePage {
    company_name: String,
    company_phone: String,
    services: Vec<Service>,
    states: Vec<StateSection>,
}

#[derive(Template)]
#[template(path = "services.html")]
struct ServicesPage {
    company_name: String,
    company_phone: String,
    services: Vec<Service>,
}

#[derive(Template)]
#[template(path = "service_detail.html")]
struct ServiceDetailPage {
    company_name: String,
    company_phone: String,
    service: Service,
    states: Vec<StateSection>,
}

#[derive(Template)]
#[template(path = "locations.html")]
struct LocationsPage {
    company_name: String,
    company_phone: String,
    states: Vec<StateSection>,
}

#[derive(Template)]
#[template(path = "state.html")]
struct StatePage {
    company_name: String,
    company_phone: String,
    name: String,
    abbreviation: String,
    description: String,
    building_codes: String,
    climate: String,
    slug: String,
    cities: Vec<CityLink>,
}

#[derive(Template)]
#[template(path = "city.html")]
struct CityPage {
    company_name: String,
    company_phone: String,
    state_name: String,
    state_slug: String,
    abbreviation: String,
    city_name: String,
    description: String,
    population: String,
    response_time: String,
    headquarters: bool,
    emergency_service: bool,
    neighborhoods: Vec<String>,
    specialties: Vec<String>,
    zip_codes: Vec<String>,
    services: Vec<Service>,
}

#[derive(Template)]
#[template(path = "blog.html")]
struct BlogPage {
    company_name: String,
    company_phone: String,
    posts: Vec<Post>,
}

#[derive(Template)]
#[template(path = "post.html")]
struct PostPage {
    company_name: String,
    company_phone: String,
    post: Post,
}

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactPage {
    company_name: String,
    company_phone: String,
    services: Vec<Service>,
}

#[derive(Template)]
#[template(path = "quote.html")]
struct QuotePage {
    company_name: String,
    company_phone: String,
    services: Vec<Service>,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundPage {
    company_name: String,
    company_phone: String,
}

fn not_found(state: &AppState) -> Response {
    let template = NotFoundPage {
        company_name: state.site.company_name.clone(),
        company_phone: state.site.company_phone.clone(),
    };
    HtmlPage {
        status: StatusCode::NOT_FOUND,
        template,
    }
    .into_response()
}

pub(crate) async fn home_handler(State(state): State<AppState>) -> Response {
    HtmlPage::ok(HomePage {
        company_name: state.site.company_name.clone(),
        company_phone: state.site.company_phone.clone(),
        services: state.content.services().to_vec(),
        states: state_sections(&state),
    })
    .into_response()
}

pub(crate) async fn services_handler(State(state): State<AppState>) -> Response {
    HtmlPage::ok(ServicesPage {
        company_name: state.site.company_name.clone(),
        company_phone: state.site.company_phone.clone(),
        services: state.content.services().to_vec(),
    })
    .into_response()
}

pub(crate) async fn service_detail_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match state.content.service(&slug) {
        Some(service) => HtmlPage::ok(ServiceDetailPage {
            company_name: state.site.company_name.clone(),
            company_phone: state.site.company_phone.clone(),
            service: service.clone(),
            states: state_sections(&state),
        })
        .into_response(),
        None => not_found(&state),
    }
}

pub(crate) async fn locations_handler(State(state): State<AppState>) -> Response {
    HtmlPage::ok(LocationsPage {
        company_name: state.site.company_name.clone(),
        company_phone: state.site.company_phone.clone(),
        states: state_sections(&state),
    })
    .into_response()
}

pub(crate) async fn state_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match state.content.state(&slug) {
        Some(st) => {
            let cities = state
                .content
                .cities_of(st)
                .into_iter()
                .map(|(slug, city)| CityLink {
                    slug: slug.to_string(),
                    name: city.name.clone(),
                    response_time: city.response_time.clone(),
                })
                .collect();
            HtmlPage::ok(StatePage {
                company_name: state.site.company_name.clone(),
                company_phone: state.site.company_phone.clone(),
                name: st.name.clone(),
                abbreviation: st.abbreviation.clone(),
                description: st.description.clone(),
                building_codes: st.building_codes.clone(),
                climate: st.climate.clone(),
                slug: st.slug.to_string(),
                cities,
            })
            .into_response()
        }
        None => not_found(&state),
    }
}

pub(crate) async fn city_handler(
    State(state): State<AppState>,
    Path((state_slug, city_slug)): Path<(String, String)>,
) -> Response {
    match state.content.city_in_state(&state_slug, &city_slug) {
        Some((st, city)) => HtmlPage::ok(CityPage {
            company_name: state.site.company_name.clone(),
            company_phone: state.site.company_phone.clone(),
            state_name: st.name.clone(),
            state_slug: st.slug.to_string(),
            abbreviation: st.abbreviation.clone(),
            city_name: city.name.clone(),
            description: city.description.clone(),
            population: thousands(city.population),
            response_time: city.response_time.clone(),
            headquarters: city.headquarters,
            emergency_service: city.emergency_service,
            neighborhoods: city.neighborhoods.clone(),
            specialties: city.specialties.clone(),
            zip_codes: city.zip_codes.clone(),
            services: state.content.services().to_vec(),
        })
        .into_response(),
        None => not_found(&state),
    }
}

pub(crate) async fn blog_handler(State(state): State<AppState>) -> Response {
    HtmlPage::ok(BlogPage {
        company_name: state.site.company_name.clone(),
        company_phone: state.site.company_phone.clone(),
        posts: state.content.posts().to_vec(),
    })
    .into_response()
}

pub(crate) async fn post_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match state.content.post(&slug) {
        Some(post) => HtmlPage::ok(PostPage {
            company_name: state.site.company_name.clone(),
            company_phone: state.site.company_phone.clone(),
            post: post.clone(),
        })
        .into_response(),
        None => not_found(&state),
    }
}

pub(crate) async fn contact_page_handler(State(state): State<AppState>) -> Response {
    HtmlPage::ok(ContactPage {
        company_name: state.site.company_name.clone(),
        company_phone: state.site.company_phone.clone(),
        services: state.content.services().to_vec(),
    })
    .into_response()
}

pub(crate) async fn quote_page_handler(State(state): State<AppState>) -> Response {
    HtmlPage::ok(QuotePage {
        company_name: state.site.company_name.clone(),
        company_phone: state.site.company_phone.clone(),
        services: state.content.services().to_vec(),
    })
    .into_response()
}

pub(crate) async fn not_found_handler(State(state): State<AppState>) -> Response {
    not_found(&state)
}
