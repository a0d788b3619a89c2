use chrono::{Datelike, Duration, Local, NaiveDate};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlAnchorElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, InputEvent, SubmitEvent};
use yew::prelude::*;
use yew_router::prelude::*;

const API_BASE_URL: &str = match option_env!("API_URL") {
    Some(url) => url,
    None => "http://localhost:8000/api",
};

fn api_url(path: &str) -> String {
    format!("{}{}", API_BASE_URL.trim_end_matches('/'), path)
}

const TOKEN_STORAGE_KEY: &str = "gastos_delivery_token";
const REDIRECT_STORAGE_KEY: &str = "gastos_delivery_redirect";

#[derive(Clone, Debug, PartialEq, Default)]
struct Session {
    token: Option<String>,
}

impl Session {
    fn authenticated(token: String) -> Self {
        Session { token: Some(token) }
    }

    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn load_session() -> Session {
    let token = local_storage()
        .and_then(|storage| storage.get_item(TOKEN_STORAGE_KEY).ok().flatten())
        .filter(|token| !token.is_empty());
    Session { token }
}

fn persist_token(token: &str) {
    match local_storage() {
        Some(storage) => {
            let _ = storage.set_item(TOKEN_STORAGE_KEY, token);
        }
        None => gloo_console::error!("localStorage indisponível; a sessão não será persistida"),
    }
}

fn clear_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_STORAGE_KEY);
    }
}

fn remember_route(path: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(REDIRECT_STORAGE_KEY, path);
    }
}

fn take_remembered_route() -> Option<String> {
    let storage = local_storage()?;
    let path = storage.get_item(REDIRECT_STORAGE_KEY).ok().flatten()?;
    let _ = storage.remove_item(REDIRECT_STORAGE_KEY);
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

fn login_return_route(stored: Option<String>) -> Route {
    stored
        .and_then(|path| Route::recognize(&path))
        .unwrap_or(Route::Expenses)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum Partner {
    Rafael,
    Guilherme,
}

impl Partner {
    const ALL: [Partner; 2] = [Partner::Rafael, Partner::Guilherme];

    fn as_str(self) -> &'static str {
        match self {
            Partner::Rafael => "Rafael",
            Partner::Guilherme => "Guilherme",
        }
    }

    fn from_name(name: &str) -> Option<Partner> {
        match name {
            "Rafael" => Some(Partner::Rafael),
            "Guilherme" => Some(Partner::Guilherme),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SplitRule {
    RentBeforeSplit,
    RentAfterSplit,
}

impl SplitRule {
    fn as_value(self) -> &'static str {
        match self {
            SplitRule::RentBeforeSplit => "rent_before_split",
            SplitRule::RentAfterSplit => "rent_after_split",
        }
    }

    fn from_value(value: &str) -> Option<SplitRule> {
        match value {
            "rent_before_split" => Some(SplitRule::RentBeforeSplit),
            "rent_after_split" => Some(SplitRule::RentAfterSplit),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SplitRule::RentBeforeSplit => "Aluguel antes da divisão",
            SplitRule::RentAfterSplit => "Aluguel após a divisão",
        }
    }
}

// Monetary fields travel as decimal strings end to end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Expense {
    id: i64,
    date: String,
    amount: String,
    partner_name: Partner,
    platform: Option<String>,
    category: Option<String>,
    note: Option<String>,
    receipt_url: Option<String>,
    created_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Settlement {
    id: i64,
    payout_id: i64,
    created_at: String,
    week_start: String,
    week_end: String,
    reimb_rafael: String,
    reimb_guilherme: String,
    net_for_split: String,
    share_rafael: String,
    share_guilherme: String,
    total_rafael: String,
    total_guilherme: String,
    rent_fee: String,
    income_total: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct CloseWeekPayload {
    week_end: String,
    ifood_amount: f64,
    ninety9_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    rent_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<SplitRule>,
}

#[derive(Clone, Debug, PartialEq, Default)]
struct ExpenseFilter {
    start: String,
    end: String,
    partner: Option<Partner>,
}

impl ExpenseFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.start.is_empty() {
            pairs.push(("start", self.start.clone()));
        }
        if !self.end.is_empty() {
            pairs.push(("end", self.end.clone()));
        }
        if let Some(partner) = self.partner {
            pairs.push(("partner_name", partner.as_str().to_string()));
        }
        pairs
    }
}

struct NewExpense {
    amount: String,
    date: String,
    partner: Partner,
    platform: String,
    category: String,
    note: String,
    file: web_sys::File,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReportFormat {
    Csv,
    Pdf,
}

impl ReportFormat {
    fn path(self) -> &'static str {
        match self {
            ReportFormat::Csv => "/reports/weekly.csv",
            ReportFormat::Pdf => "/reports/weekly.pdf",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
        }
    }
}

fn report_filename(week_end: &str, format: ReportFormat) -> String {
    format!("relatorio-{}.{}", week_end, format.extension())
}

#[derive(Clone, Debug, PartialEq, Error)]
#[error("{message}")]
struct ApiError {
    message: String,
}

impl ApiError {
    fn new(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
        }
    }
}

// Error bodies follow the backend convention: {"detail": "..."} for plain
// failures, {"detail": [{"msg": "..."}, ...]} for field validation.
fn extract_detail(body: &serde_json::Value) -> Option<String> {
    match body.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        serde_json::Value::Array(entries) => entries
            .first()?
            .get("msg")
            .and_then(|msg| msg.as_str())
            .map(str::to_string),
        _ => None,
    }
}

async fn error_from_response(response: Response) -> ApiError {
    let fallback = format!("Falha na requisição (status {})", response.status());
    match response.json::<serde_json::Value>().await {
        Ok(body) => ApiError::new(extract_detail(&body).unwrap_or(fallback)),
        Err(_) => ApiError::new(fallback),
    }
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(error_from_response(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::new(err.to_string()))
}

fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {}", token))
}

async fn login_request(email: &str, password: &str) -> Result<String, ApiError> {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = Request::post(&api_url("/auth/login"))
        .json(&body)
        .map_err(|err| ApiError::new(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::new(err.to_string()))?;
    let token: TokenResponse = parse_response(response).await?;
    Ok(token.access_token)
}

async fn list_expenses(token: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>, ApiError> {
    let pairs = filter.query_pairs();
    let response = authorized(Request::get(&api_url("/expenses")), token)
        .query(pairs.iter().map(|(key, value)| (*key, value.as_str())))
        .send()
        .await
        .map_err(|err| ApiError::new(err.to_string()))?;
    parse_response(response).await
}

async fn create_expense(token: &str, form: &NewExpense) -> Result<Expense, ApiError> {
    let data = web_sys::FormData::new()
        .map_err(|_| ApiError::new("Não foi possível montar o formulário de envio"))?;
    let _ = data.append_with_blob("file", &form.file);
    let _ = data.append_with_str("amount", form.amount.trim());
    let _ = data.append_with_str("date_value", &form.date);
    let _ = data.append_with_str("partner_name", form.partner.as_str());
    if !form.platform.trim().is_empty() {
        let _ = data.append_with_str("platform", form.platform.trim());
    }
    if !form.category.trim().is_empty() {
        let _ = data.append_with_str("category", form.category.trim());
    }
    if !form.note.trim().is_empty() {
        let _ = data.append_with_str("note", form.note.trim());
    }

    let response = authorized(Request::post(&api_url("/expenses")), token)
        .body(data)
        .map_err(|err| ApiError::new(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::new(err.to_string()))?;
    parse_response(response).await
}

async fn close_week(token: &str, payload: &CloseWeekPayload) -> Result<Settlement, ApiError> {
    let response = authorized(Request::post(&api_url("/payouts/close_week")), token)
        .json(payload)
        .map_err(|err| ApiError::new(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::new(err.to_string()))?;
    parse_response(response).await
}

async fn fetch_settlement(token: &str, id: i64) -> Result<Settlement, ApiError> {
    let response = authorized(Request::get(&api_url(&format!("/settlements/{}", id))), token)
        .send()
        .await
        .map_err(|err| ApiError::new(err.to_string()))?;
    parse_response(response).await
}

async fn list_settlements(token: &str) -> Result<Vec<Settlement>, ApiError> {
    let response = authorized(Request::get(&api_url("/reports/settlements")), token)
        .send()
        .await
        .map_err(|err| ApiError::new(err.to_string()))?;
    parse_response(response).await
}

async fn fetch_weekly_report(
    token: &str,
    week_end: &str,
    format: ReportFormat,
) -> Result<Vec<u8>, ApiError> {
    let response = authorized(Request::get(&api_url(format.path())), token)
        .query([("week_end", week_end)])
        .send()
        .await
        .map_err(|err| ApiError::new(err.to_string()))?;
    if !response.ok() {
        return Err(error_from_response(response).await);
    }
    response
        .binary()
        .await
        .map_err(|err| ApiError::new(err.to_string()))
}

async fn download_weekly_csv(token: &str, week_end: &str) -> Result<Vec<u8>, ApiError> {
    fetch_weekly_report(token, week_end, ReportFormat::Csv).await
}

async fn download_weekly_pdf(token: &str, week_end: &str) -> Result<Vec<u8>, ApiError> {
    fetch_weekly_report(token, week_end, ReportFormat::Pdf).await
}

// The business week closes on Wednesdays (index 3, Sunday-based).
const SETTLEMENT_WEEKDAY: i64 = 3;

fn ensure_wednesday(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday() as i64 - SETTLEMENT_WEEKDAY;
    date - Duration::days(offset)
}

fn current_wednesday() -> NaiveDate {
    ensure_wednesday(Local::now().date_naive())
}

fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn today_iso() -> String {
    format_iso(Local::now().date_naive())
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('.');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

// Decimal strings render as Brazilian Real; anything unparsable passes
// through untouched.
fn format_currency(value: &str) -> String {
    let number = match value.trim().parse::<f64>() {
        Ok(number) => number,
        Err(_) => return value.to_string(),
    };
    let cents = (number.abs() * 100.0).round() as i64;
    let sign = if number < 0.0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, group_thousands(cents / 100), cents % 100)
}

fn format_date_br(value: &str) -> String {
    match parse_iso(value) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => value.to_string(),
    }
}

fn expense_form_ready(amount: &str, date: &str, has_receipt: bool) -> bool {
    !amount.trim().is_empty() && !date.trim().is_empty() && has_receipt
}

fn trigger_download(bytes: &[u8], filename: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window indisponível"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("document indisponível"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    if let Some(body) = document.body() {
        let _ = body.append_child(&anchor);
    }
    anchor.click();
    anchor.remove();
    web_sys::Url::revoke_object_url(&url)?;
    Ok(())
}

fn export_report(
    token: String,
    week_end: String,
    format: ReportFormat,
    error: UseStateHandle<Option<String>>,
) {
    spawn_local(async move {
        let result = match format {
            ReportFormat::Csv => download_weekly_csv(&token, &week_end).await,
            ReportFormat::Pdf => download_weekly_pdf(&token, &week_end).await,
        };
        let bytes = match result {
            Ok(bytes) => bytes,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        if let Err(err) = trigger_download(&bytes, &report_filename(&week_end, format)) {
            gloo_console::error!("falha ao disparar o download do relatório", err);
            error.set(Some("Erro ao baixar relatório".to_string()));
        }
    });
}

#[derive(Clone, Debug, Routable, PartialEq)]
enum Route {
    #[at("/login")]
    Login,
    #[at("/despesas")]
    Expenses,
    #[at("/fechamento")]
    WeekClosing,
    #[at("/relatorios")]
    Settlements,
    #[at("/relatorios/:id")]
    SettlementDetail { id: i64 },
    #[at("/")]
    Root,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::Root | Route::NotFound)
    }
}

fn switch(route: Route, session: UseStateHandle<Session>) -> Html {
    if route.requires_auth() && !session.is_authenticated() {
        remember_route(&route.to_path());
        return html! { <Redirect<Route> to={Route::Login} /> };
    }

    match route {
        Route::Login => html! { <LoginPage {session} /> },
        Route::Expenses => html! { <ExpensesPage {session} /> },
        Route::WeekClosing => html! { <WeekClosingPage {session} /> },
        Route::Settlements => html! { <SettlementsPage {session} /> },
        Route::SettlementDetail { id } => html! { <SettlementDetailPage {id} {session} /> },
        Route::Root | Route::NotFound => html! { <Redirect<Route> to={Route::Expenses} /> },
    }
}

#[derive(Properties, PartialEq)]
struct WeekPickerProps {
    value: String,
    onchange: Callback<String>,
}

#[function_component(WeekPicker)]
fn week_picker(props: &WeekPickerProps) -> Html {
    let current =
        ensure_wednesday(parse_iso(&props.value).unwrap_or_else(|| Local::now().date_naive()));

    let go_previous = {
        let onchange = props.onchange.clone();
        Callback::from(move |_| {
            onchange.emit(format_iso(ensure_wednesday(current - Duration::days(7))));
        })
    };

    let go_next = {
        let onchange = props.onchange.clone();
        Callback::from(move |_| {
            onchange.emit(format_iso(ensure_wednesday(current + Duration::days(7))));
        })
    };

    let on_input = {
        let onchange = props.onchange.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let typed = parse_iso(&input.value()).unwrap_or_else(|| Local::now().date_naive());
            onchange.emit(format_iso(ensure_wednesday(typed)));
        })
    };

    html! {
        <div class="week-picker">
            <button type="button" class="button secondary" onclick={go_previous}>{"Semana anterior"}</button>
            <div>
                <label>{"Quarta-feira"}</label>
                <input type="date" value={format_iso(current)} onchange={on_input} />
            </div>
            <button type="button" class="button secondary" onclick={go_next}>{"Próxima semana"}</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct FileUploadProps {
    #[prop_or("Nota fiscal".to_string())]
    label: String,
    #[prop_or("image/*".to_string())]
    accept: String,
    on_select: Callback<Option<web_sys::File>>,
}

#[function_component(FileUpload)]
fn file_upload(props: &FileUploadProps) -> Html {
    let file_name = use_state(String::new);

    let on_change = {
        let file_name = file_name.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let file = input.files().and_then(|files| files.get(0));
            file_name.set(file.as_ref().map(|file| file.name()).unwrap_or_default());
            on_select.emit(file);
        })
    };

    html! {
        <div>
            <label>{ props.label.clone() }</label>
            <input type="file" accept={props.accept.clone()} onchange={on_change} />
            if !file_name.is_empty() {
                <small>{ format!("Selecionado: {}", *file_name) }</small>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct LoginPageProps {
    session: UseStateHandle<Session>,
}

#[function_component(LoginPage)]
fn login_page(props: &LoginPageProps) -> Html {
    let navigator = use_navigator();
    let email = use_state(|| "rafael@delivery.com".to_string());
    let password = use_state(String::new);
    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);

    if props.session.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Expenses} /> };
    }

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let loading = loading.clone();
        let error = error.clone();
        let session = props.session.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email_val = (*email).clone();
            let password_val = (*password).clone();
            let loading = loading.clone();
            let error = error.clone();
            let session = session.clone();
            let navigator = navigator.clone();

            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match login_request(&email_val, &password_val).await {
                    Ok(token) => {
                        persist_token(&token);
                        session.set(Session::authenticated(token));
                        let destination = login_return_route(take_remembered_route());
                        if let Some(navigator) = navigator {
                            navigator.replace(&destination);
                        }
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="card login-card">
            <h2>{"Entrar"}</h2>
            <p>{"Acesse com o email e a senha da unidade."}</p>
            if let Some(message) = &*error {
                <div class="alert">{ message.clone() }</div>
            }
            <form onsubmit={on_submit}>
                <div class="form-row">
                    <div>
                        <label>{"Email"}</label>
                        <input
                            type="email"
                            value={(*email).clone()}
                            required={true}
                            oninput={{
                                let email = email.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    email.set(input.value());
                                })
                            }}
                        />
                    </div>
                </div>
                <div class="form-row">
                    <div>
                        <label>{"Senha"}</label>
                        <input
                            type="password"
                            value={(*password).clone()}
                            required={true}
                            oninput={{
                                let password = password.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    password.set(input.value());
                                })
                            }}
                        />
                    </div>
                </div>
                <button class="button" type="submit" disabled={*loading}>
                    { if *loading { "Entrando..." } else { "Entrar" } }
                </button>
            </form>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ExpensesPageProps {
    session: UseStateHandle<Session>,
}

#[function_component(ExpensesPage)]
fn expenses_page(props: &ExpensesPageProps) -> Html {
    let expenses = use_state(|| Vec::<Expense>::new());
    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);
    let success = use_state(|| None::<String>);

    let amount = use_state(String::new);
    let date_value = use_state(today_iso);
    let partner = use_state(|| Partner::Rafael);
    let platform = use_state(String::new);
    let category = use_state(String::new);
    let note = use_state(String::new);
    let receipt_file = use_state(|| None::<web_sys::File>);
    let upload_key = use_state(|| 0u32);

    let start = use_state(String::new);
    let end = use_state(String::new);
    let partner_filter = use_state(|| None::<Partner>);

    let fetch_expenses = {
        let expenses = expenses.clone();
        let loading = loading.clone();
        let error = error.clone();
        let start = start.clone();
        let end = end.clone();
        let partner_filter = partner_filter.clone();
        let session = props.session.clone();
        Callback::from(move |_: ()| {
            let token = match &session.token {
                Some(token) => token.clone(),
                None => return,
            };
            let filter = ExpenseFilter {
                start: (*start).clone(),
                end: (*end).clone(),
                partner: *partner_filter,
            };
            let expenses = expenses.clone();
            let loading = loading.clone();
            let error = error.clone();

            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match list_expenses(&token, &filter).await {
                    Ok(list) => expenses.set(list),
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
        })
    };

    {
        let fetch_expenses = fetch_expenses.clone();
        use_effect_with_deps(
            move |_| {
                fetch_expenses.emit(());
                || ()
            },
            (),
        );
    }

    let on_submit = {
        let amount = amount.clone();
        let date_value = date_value.clone();
        let partner = partner.clone();
        let platform = platform.clone();
        let category = category.clone();
        let note = note.clone();
        let receipt_file = receipt_file.clone();
        let upload_key = upload_key.clone();
        let expenses = expenses.clone();
        let loading = loading.clone();
        let error = error.clone();
        let success = success.clone();
        let session = props.session.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let token = match &session.token {
                Some(token) => token.clone(),
                None => return,
            };
            let file = match &*receipt_file {
                Some(file) => file.clone(),
                None => return,
            };
            if !expense_form_ready(&amount, &date_value, true) {
                return;
            }

            let form = NewExpense {
                amount: (*amount).clone(),
                date: (*date_value).clone(),
                partner: *partner,
                platform: (*platform).clone(),
                category: (*category).clone(),
                note: (*note).clone(),
                file,
            };
            let amount = amount.clone();
            let platform = platform.clone();
            let category = category.clone();
            let note = note.clone();
            let receipt_file = receipt_file.clone();
            let upload_key = upload_key.clone();
            let expenses = expenses.clone();
            let loading = loading.clone();
            let error = error.clone();
            let success = success.clone();

            loading.set(true);
            error.set(None);
            success.set(None);
            spawn_local(async move {
                match create_expense(&token, &form).await {
                    Ok(created) => {
                        let mut next = (*expenses).clone();
                        next.insert(0, created);
                        expenses.set(next);
                        success.set(Some("Despesa cadastrada com sucesso!".to_string()));
                        amount.set(String::new());
                        note.set(String::new());
                        platform.set(String::new());
                        category.set(String::new());
                        receipt_file.set(None);
                        upload_key.set(*upload_key + 1);
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
        })
    };

    let on_filter = {
        let fetch_expenses = fetch_expenses.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            fetch_expenses.emit(());
        })
    };

    let on_file_select = {
        let receipt_file = receipt_file.clone();
        Callback::from(move |file: Option<web_sys::File>| receipt_file.set(file))
    };

    let form_ready = expense_form_ready(&amount, &date_value, receipt_file.is_some());

    html! {
        <div>
            <h1>{"Controle de Despesas"}</h1>

            <section class="card">
                <h2>{"Nova despesa"}</h2>
                if let Some(message) = &*error {
                    <div class="alert">{ message.clone() }</div>
                }
                if let Some(message) = &*success {
                    <div class="alert success">{ message.clone() }</div>
                }
                <form onsubmit={on_submit}>
                    <div class="form-row">
                        <div>
                            <label>{"Valor (R$)"}</label>
                            <input
                                type="number"
                                step="0.01"
                                min="0"
                                value={(*amount).clone()}
                                required={true}
                                oninput={{
                                    let amount = amount.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        amount.set(input.value());
                                    })
                                }}
                            />
                        </div>
                        <div>
                            <label>{"Data"}</label>
                            <input
                                type="date"
                                value={(*date_value).clone()}
                                required={true}
                                onchange={{
                                    let date_value = date_value.clone();
                                    Callback::from(move |e: Event| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        date_value.set(input.value());
                                    })
                                }}
                            />
                        </div>
                        <div>
                            <label>{"Quem pagou"}</label>
                            <select onchange={{
                                let partner = partner.clone();
                                Callback::from(move |e: Event| {
                                    let select: HtmlSelectElement = e.target_unchecked_into();
                                    if let Some(selected) = Partner::from_name(&select.value()) {
                                        partner.set(selected);
                                    }
                                })
                            }}>
                                { for Partner::ALL.iter().map(|option| html! {
                                    <option value={option.as_str()} selected={*partner == *option}>
                                        { option.as_str() }
                                    </option>
                                }) }
                            </select>
                        </div>
                    </div>
                    <div class="form-row">
                        <div>
                            <label>{"Plataforma / Fornecedor"}</label>
                            <input
                                placeholder="iFood, 99Food, mercado..."
                                value={(*platform).clone()}
                                oninput={{
                                    let platform = platform.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        platform.set(input.value());
                                    })
                                }}
                            />
                        </div>
                        <div>
                            <label>{"Categoria"}</label>
                            <input
                                placeholder="ingredientes, embalagem..."
                                value={(*category).clone()}
                                oninput={{
                                    let category = category.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        category.set(input.value());
                                    })
                                }}
                            />
                        </div>
                    </div>
                    <div class="form-row">
                        <div>
                            <label>{"Observação"}</label>
                            <textarea
                                rows="3"
                                value={(*note).clone()}
                                oninput={{
                                    let note = note.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlTextAreaElement = e.target_unchecked_into();
                                        note.set(input.value());
                                    })
                                }}
                            />
                        </div>
                    </div>
                    <FileUpload key={(*upload_key).to_string()} on_select={on_file_select} />
                    <button class="button" type="submit" disabled={!form_ready || *loading}>
                        { if *loading { "Enviando..." } else { "Salvar despesa" } }
                    </button>
                </form>
            </section>

            <section class="card">
                <h2>{"Despesas recentes"}</h2>
                <form class="filter-form" onsubmit={on_filter}>
                    <div class="form-row">
                        <div>
                            <label>{"Data inicial"}</label>
                            <input
                                type="date"
                                value={(*start).clone()}
                                onchange={{
                                    let start = start.clone();
                                    Callback::from(move |e: Event| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        start.set(input.value());
                                    })
                                }}
                            />
                        </div>
                        <div>
                            <label>{"Data final"}</label>
                            <input
                                type="date"
                                value={(*end).clone()}
                                onchange={{
                                    let end = end.clone();
                                    Callback::from(move |e: Event| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        end.set(input.value());
                                    })
                                }}
                            />
                        </div>
                        <div>
                            <label>{"Quem pagou"}</label>
                            <select onchange={{
                                let partner_filter = partner_filter.clone();
                                Callback::from(move |e: Event| {
                                    let select: HtmlSelectElement = e.target_unchecked_into();
                                    partner_filter.set(Partner::from_name(&select.value()));
                                })
                            }}>
                                <option value="" selected={partner_filter.is_none()}>{"Todos"}</option>
                                { for Partner::ALL.iter().map(|option| html! {
                                    <option value={option.as_str()} selected={*partner_filter == Some(*option)}>
                                        { option.as_str() }
                                    </option>
                                }) }
                            </select>
                        </div>
                    </div>
                    <button class="button secondary" type="submit">{"Filtrar"}</button>
                </form>

                { if *loading {
                    html! { <p>{"Carregando..."}</p> }
                } else if expenses.is_empty() {
                    html! { <p>{"Nenhuma despesa encontrada."}</p> }
                } else {
                    html! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>{"Data"}</th>
                                <th>{"Pagador"}</th>
                                <th>{"Valor"}</th>
                                <th>{"Plataforma"}</th>
                                <th>{"Categoria"}</th>
                                <th>{"Observação"}</th>
                                <th>{"Comprovante"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for expenses.iter().map(|expense| html! {
                                <tr key={expense.id.to_string()}>
                                    <td>{ format_date_br(&expense.date) }</td>
                                    <td>{ expense.partner_name.as_str() }</td>
                                    <td>{ format_currency(&expense.amount) }</td>
                                    <td>{ expense.platform.clone().unwrap_or_else(|| "-".to_string()) }</td>
                                    <td>{ expense.category.clone().unwrap_or_else(|| "-".to_string()) }</td>
                                    <td>{ expense.note.clone().unwrap_or_else(|| "-".to_string()) }</td>
                                    <td>
                                        {
                                            match &expense.receipt_url {
                                                Some(url) => html! {
                                                    <a href={url.clone()} target="_blank" rel="noreferrer">{"ver nota"}</a>
                                                },
                                                None => html! { {"-"} },
                                            }
                                        }
                                    </td>
                                </tr>
                            }) }
                        </tbody>
                    </table>
                    }
                }}
            </section>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct WeekClosingPageProps {
    session: UseStateHandle<Session>,
}

#[function_component(WeekClosingPage)]
fn week_closing_page(props: &WeekClosingPageProps) -> Html {
    let week_end = use_state(|| format_iso(current_wednesday()));
    let ifood_amount = use_state(|| "0".to_string());
    let ninety9_amount = use_state(|| "0".to_string());
    let rent_fee = use_state(|| "50".to_string());
    let rule = use_state(|| SplitRule::RentBeforeSplit);

    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);
    let result = use_state(|| None::<Settlement>);

    let on_week_change = {
        let week_end = week_end.clone();
        Callback::from(move |value: String| week_end.set(value))
    };

    let on_submit = {
        let week_end = week_end.clone();
        let ifood_amount = ifood_amount.clone();
        let ninety9_amount = ninety9_amount.clone();
        let rent_fee = rent_fee.clone();
        let rule = rule.clone();
        let loading = loading.clone();
        let error = error.clone();
        let result = result.clone();
        let session = props.session.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let token = match &session.token {
                Some(token) => token.clone(),
                None => return,
            };
            let payload = CloseWeekPayload {
                week_end: (*week_end).clone(),
                ifood_amount: ifood_amount.trim().parse().unwrap_or(0.0),
                ninety9_amount: ninety9_amount.trim().parse().unwrap_or(0.0),
                rent_fee: Some(rent_fee.trim().parse().unwrap_or(0.0)),
                rule: Some(*rule),
            };
            let loading = loading.clone();
            let error = error.clone();
            let result = result.clone();

            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match close_week(&token, &payload).await {
                    Ok(settlement) => result.set(Some(settlement)),
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
        })
    };

    let on_export = {
        let session = props.session.clone();
        let result = result.clone();
        let error = error.clone();
        Callback::from(move |format: ReportFormat| {
            let token = match &session.token {
                Some(token) => token.clone(),
                None => return,
            };
            let settlement = match &*result {
                Some(settlement) => settlement.clone(),
                None => return,
            };
            export_report(token, settlement.week_end, format, error.clone());
        })
    };

    html! {
        <div>
            <h1>{"Fechamento semanal"}</h1>

            <section class="card">
                <h2>{"Fechar semana"}</h2>
                if let Some(message) = &*error {
                    <div class="alert">{ message.clone() }</div>
                }
                <form onsubmit={on_submit}>
                    <div class="form-row">
                        <WeekPicker value={(*week_end).clone()} onchange={on_week_change} />
                    </div>
                    <div class="form-row">
                        <div>
                            <label>{"Recebido iFood"}</label>
                            <input
                                type="number"
                                step="0.01"
                                min="0"
                                value={(*ifood_amount).clone()}
                                oninput={{
                                    let ifood_amount = ifood_amount.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        ifood_amount.set(input.value());
                                    })
                                }}
                            />
                        </div>
                        <div>
                            <label>{"Recebido 99 Food"}</label>
                            <input
                                type="number"
                                step="0.01"
                                min="0"
                                value={(*ninety9_amount).clone()}
                                oninput={{
                                    let ninety9_amount = ninety9_amount.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        ninety9_amount.set(input.value());
                                    })
                                }}
                            />
                        </div>
                        <div>
                            <label>{"Aluguel (R$)"}</label>
                            <input
                                type="number"
                                step="0.01"
                                min="0"
                                value={(*rent_fee).clone()}
                                oninput={{
                                    let rent_fee = rent_fee.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        rent_fee.set(input.value());
                                    })
                                }}
                            />
                        </div>
                    </div>
                    <div class="form-row">
                        <div>
                            <label>{"Regra"}</label>
                            <select onchange={{
                                let rule = rule.clone();
                                Callback::from(move |e: Event| {
                                    let select: HtmlSelectElement = e.target_unchecked_into();
                                    if let Some(selected) = SplitRule::from_value(&select.value()) {
                                        rule.set(selected);
                                    }
                                })
                            }}>
                                { for [SplitRule::RentBeforeSplit, SplitRule::RentAfterSplit].iter().map(|option| html! {
                                    <option value={option.as_value()} selected={*rule == *option}>
                                        { option.label() }
                                    </option>
                                }) }
                            </select>
                        </div>
                    </div>
                    <button class="button" type="submit" disabled={*loading}>
                        { if *loading { "Calculando..." } else { "Fechar semana" } }
                    </button>
                </form>
            </section>

            if let Some(settlement) = &*result {
                <section class="card">
                    <h2>{"Resumo"}</h2>
                    { settlement_breakdown(settlement) }
                    <div class="actions">
                        <button class="button" type="button" onclick={{
                            let on_export = on_export.clone();
                            Callback::from(move |_| on_export.emit(ReportFormat::Csv))
                        }}>{"Exportar CSV"}</button>
                        <button class="button secondary" type="button" onclick={{
                            let on_export = on_export.clone();
                            Callback::from(move |_| on_export.emit(ReportFormat::Pdf))
                        }}>{"Exportar PDF"}</button>
                    </div>
                </section>
            }
        </div>
    }
}

fn settlement_breakdown(settlement: &Settlement) -> Html {
    html! {
        <>
            <div class="form-row">
                <div>
                    <strong>{"Período"}</strong>
                    <p>{ format!("{} - {}", format_date_br(&settlement.week_start), format_date_br(&settlement.week_end)) }</p>
                </div>
                <div>
                    <strong>{"Total recebido"}</strong>
                    <p>{ format_currency(&settlement.income_total) }</p>
                </div>
                <div>
                    <strong>{"Aluguel"}</strong>
                    <p>{ format_currency(&settlement.rent_fee) }</p>
                </div>
            </div>
            <div class="form-row">
                <div>
                    <strong>{"Rafael"}</strong>
                    <p>
                        { format!("Total: {}", format_currency(&settlement.total_rafael)) }<br/>
                        { format!("Reembolso: {}", format_currency(&settlement.reimb_rafael)) }<br/>
                        { format!("Parte: {}", format_currency(&settlement.share_rafael)) }
                    </p>
                </div>
                <div>
                    <strong>{"Guilherme"}</strong>
                    <p>
                        { format!("Total: {}", format_currency(&settlement.total_guilherme)) }<br/>
                        { format!("Reembolso: {}", format_currency(&settlement.reimb_guilherme)) }<br/>
                        { format!("Parte: {}", format_currency(&settlement.share_guilherme)) }
                    </p>
                </div>
                <div>
                    <strong>{"Saldo para dividir"}</strong>
                    <p>{ format_currency(&settlement.net_for_split) }</p>
                </div>
            </div>
        </>
    }
}

#[derive(Properties, PartialEq)]
struct SettlementsPageProps {
    session: UseStateHandle<Session>,
}

#[function_component(SettlementsPage)]
fn settlements_page(props: &SettlementsPageProps) -> Html {
    let settlements = use_state(|| Vec::<Settlement>::new());
    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);

    {
        let settlements = settlements.clone();
        let loading = loading.clone();
        let error = error.clone();
        let session = props.session.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(token) = session.token.clone() {
                    loading.set(true);
                    error.set(None);
                    spawn_local(async move {
                        match list_settlements(&token).await {
                            Ok(list) => settlements.set(list),
                            Err(err) => error.set(Some(err.to_string())),
                        }
                        loading.set(false);
                    });
                }
                || ()
            },
            (),
        );
    }

    html! {
        <div>
            <h1>{"Relatórios semanais"}</h1>
            if let Some(message) = &*error {
                <div class="alert">{ message.clone() }</div>
            }
            { if *loading {
                html! { <p>{"Carregando..."}</p> }
            } else if settlements.is_empty() {
                html! { <p>{"Nenhum fechamento registrado."}</p> }
            } else {
                html! {
                <table class="table">
                    <thead>
                        <tr>
                            <th>{"Semana"}</th>
                            <th>{"Total"}</th>
                            <th>{"Rafael"}</th>
                            <th>{"Guilherme"}</th>
                            <th>{"Ações"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for settlements.iter().map(|settlement| html! {
                            <tr key={settlement.id.to_string()}>
                                <td>{ format!("{} - {}", format_date_br(&settlement.week_start), format_date_br(&settlement.week_end)) }</td>
                                <td>{ format_currency(&settlement.income_total) }</td>
                                <td>{ format_currency(&settlement.total_rafael) }</td>
                                <td>{ format_currency(&settlement.total_guilherme) }</td>
                                <td>
                                    <Link<Route> to={Route::SettlementDetail { id: settlement.id }}>{"Detalhes"}</Link<Route>>
                                </td>
                            </tr>
                        }) }
                    </tbody>
                </table>
                }
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SettlementDetailPageProps {
    id: i64,
    session: UseStateHandle<Session>,
}

#[function_component(SettlementDetailPage)]
fn settlement_detail_page(props: &SettlementDetailPageProps) -> Html {
    let settlement = use_state(|| None::<Settlement>);
    let error = use_state(|| None::<String>);

    {
        let settlement = settlement.clone();
        let error = error.clone();
        let session = props.session.clone();
        let id = props.id;
        use_effect_with_deps(
            move |_| {
                if let Some(token) = session.token.clone() {
                    spawn_local(async move {
                        match fetch_settlement(&token, id).await {
                            Ok(found) => settlement.set(Some(found)),
                            Err(err) => error.set(Some(err.to_string())),
                        }
                    });
                }
                || ()
            },
            props.id,
        );
    }

    let on_export = {
        let session = props.session.clone();
        let settlement = settlement.clone();
        let error = error.clone();
        Callback::from(move |format: ReportFormat| {
            let token = match &session.token {
                Some(token) => token.clone(),
                None => return,
            };
            let found = match &*settlement {
                Some(found) => found.clone(),
                None => return,
            };
            export_report(token, found.week_end, format, error.clone());
        })
    };

    if let Some(message) = &*error {
        return html! { <div class="alert">{ message.clone() }</div> };
    }

    let found = match &*settlement {
        Some(found) => found.clone(),
        None => return html! { <p>{"Carregando..."}</p> },
    };

    html! {
        <section class="card">
            <h2>{ format!("Fechamento {}", format_date_br(&found.week_end)) }</h2>
            { settlement_breakdown(&found) }
            <div class="actions">
                <button class="button" type="button" onclick={{
                    let on_export = on_export.clone();
                    Callback::from(move |_| on_export.emit(ReportFormat::Csv))
                }}>{"Baixar CSV"}</button>
                <button class="button secondary" type="button" onclick={{
                    let on_export = on_export.clone();
                    Callback::from(move |_| on_export.emit(ReportFormat::Pdf))
                }}>{"Baixar PDF"}</button>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct NavigationProps {
    session: UseStateHandle<Session>,
}

#[function_component(Navigation)]
fn navigation(props: &NavigationProps) -> Html {
    if !props.session.is_authenticated() {
        return html! {};
    }

    let on_logout = {
        let session = props.session.clone();
        Callback::from(move |_| {
            clear_token();
            session.set(Session::default());
        })
    };

    html! {
        <header class="topbar">
            <nav class="container nav-row">
                <strong>{"Delivery Cheffinho - Unidade 2"}</strong>
                <div class="nav-links">
                    <Link<Route> to={Route::Expenses}>{"Despesas"}</Link<Route>>
                    <Link<Route> to={Route::WeekClosing}>{"Fechamento"}</Link<Route>>
                    <Link<Route> to={Route::Settlements}>{"Relatórios"}</Link<Route>>
                    <button class="button secondary" onclick={on_logout}>{"Sair"}</button>
                </div>
            </nav>
        </header>
    }
}

#[function_component(App)]
fn app() -> Html {
    let session = use_state(load_session);

    let render_routes = {
        let session = session.clone();
        Callback::from(move |route: Route| switch(route, session.clone()))
    };

    html! {
        <BrowserRouter>
            <Navigation session={session.clone()} />
            <main class="container">
                <Switch<Route> render={render_routes} />
            </main>
        </BrowserRouter>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn normalizing_a_wednesday_returns_the_same_date() {
        let wednesday = date(2024, 5, 8);
        assert_eq!(ensure_wednesday(wednesday), wednesday);
    }

    #[test]
    fn every_day_of_the_week_maps_to_its_wednesday() {
        let wednesday = date(2024, 5, 8);
        // Sunday 2024-05-05 through Saturday 2024-05-11.
        for day in 5..=11 {
            assert_eq!(ensure_wednesday(date(2024, 5, day)), wednesday);
        }
    }

    #[test]
    fn week_navigation_moves_exactly_seven_days_and_stays_normalized() {
        let wednesday = date(2024, 5, 8);
        assert_eq!(
            ensure_wednesday(wednesday + Duration::days(7)),
            date(2024, 5, 15)
        );
        assert_eq!(
            ensure_wednesday(wednesday - Duration::days(7)),
            date(2024, 5, 1)
        );
    }

    #[test]
    fn currency_formats_numeric_strings_as_brl() {
        assert_eq!(format_currency("100"), "R$ 100,00");
        assert_eq!(format_currency("1234.5"), "R$ 1.234,50");
        assert_eq!(format_currency("1234567.89"), "R$ 1.234.567,89");
        assert_eq!(format_currency("-50"), "-R$ 50,00");
    }

    #[test]
    fn currency_passes_non_numeric_strings_through() {
        assert_eq!(format_currency("abc"), "abc");
        assert_eq!(format_currency(""), "");
    }

    #[test]
    fn dates_render_in_brazilian_order() {
        assert_eq!(format_date_br("2024-05-08"), "08/05/2024");
        assert_eq!(format_date_br("not-a-date"), "not-a-date");
    }

    #[test]
    fn detail_extraction_prefers_plain_strings() {
        assert_eq!(
            extract_detail(&json!({ "detail": "Invalid credentials" })),
            Some("Invalid credentials".to_string())
        );
    }

    #[test]
    fn detail_extraction_takes_the_first_validation_message() {
        let body =
            json!({ "detail": [{ "msg": "amount must be greater than zero" }, { "msg": "other" }] });
        assert_eq!(
            extract_detail(&body),
            Some("amount must be greater than zero".to_string())
        );
    }

    #[test]
    fn detail_extraction_gives_up_on_unknown_shapes() {
        assert_eq!(extract_detail(&json!({ "other": 1 })), None);
        assert_eq!(extract_detail(&json!({ "detail": 5 })), None);
        assert_eq!(extract_detail(&json!({ "detail": [] })), None);
    }

    #[test]
    fn expense_form_requires_amount_date_and_receipt() {
        assert!(expense_form_ready("10", "2024-05-08", true));
        assert!(!expense_form_ready("", "2024-05-08", true));
        assert!(!expense_form_ready("  ", "2024-05-08", true));
        assert!(!expense_form_ready("10", "", true));
        assert!(!expense_form_ready("10", "2024-05-08", false));
    }

    #[test]
    fn routes_cover_the_five_destinations() {
        assert_eq!(Route::recognize("/login"), Some(Route::Login));
        assert_eq!(Route::recognize("/despesas"), Some(Route::Expenses));
        assert_eq!(Route::recognize("/fechamento"), Some(Route::WeekClosing));
        assert_eq!(Route::recognize("/relatorios"), Some(Route::Settlements));
        assert_eq!(
            Route::recognize("/relatorios/7"),
            Some(Route::SettlementDetail { id: 7 })
        );
    }

    #[test]
    fn settlement_detail_paths_round_trip() {
        assert_eq!(Route::SettlementDetail { id: 3 }.to_path(), "/relatorios/3");
    }

    #[test]
    fn only_login_and_redirect_routes_skip_the_auth_gate() {
        assert!(!Route::Login.requires_auth());
        assert!(!Route::Root.requires_auth());
        assert!(!Route::NotFound.requires_auth());
        assert!(Route::Expenses.requires_auth());
        assert!(Route::WeekClosing.requires_auth());
        assert!(Route::Settlements.requires_auth());
        assert!(Route::SettlementDetail { id: 1 }.requires_auth());
    }

    #[test]
    fn login_returns_to_the_remembered_destination() {
        assert_eq!(
            login_return_route(Some("/fechamento".to_string())),
            Route::WeekClosing
        );
        assert_eq!(
            login_return_route(Some("/relatorios/12".to_string())),
            Route::SettlementDetail { id: 12 }
        );
        assert_eq!(login_return_route(None), Route::Expenses);
    }

    #[test]
    fn report_filenames_derive_from_the_week_end() {
        assert_eq!(
            report_filename("2024-05-08", ReportFormat::Csv),
            "relatorio-2024-05-08.csv"
        );
        assert_eq!(
            report_filename("2024-05-08", ReportFormat::Pdf),
            "relatorio-2024-05-08.pdf"
        );
    }

    #[test]
    fn partners_serialize_as_their_fixed_names() {
        assert_eq!(
            serde_json::to_value(Partner::Rafael).unwrap(),
            json!("Rafael")
        );
        assert_eq!(
            serde_json::to_value(Partner::Guilherme).unwrap(),
            json!("Guilherme")
        );
        assert_eq!(Partner::from_name("Rafael"), Some(Partner::Rafael));
        assert_eq!(Partner::from_name("outra pessoa"), None);
    }

    #[test]
    fn split_rules_serialize_as_snake_case_literals() {
        assert_eq!(
            serde_json::to_value(SplitRule::RentBeforeSplit).unwrap(),
            json!("rent_before_split")
        );
        assert_eq!(
            serde_json::to_value(SplitRule::RentAfterSplit).unwrap(),
            json!("rent_after_split")
        );
    }

    #[test]
    fn close_week_payload_omits_absent_optionals() {
        let payload = CloseWeekPayload {
            week_end: "2024-05-08".to_string(),
            ifood_amount: 100.0,
            ninety9_amount: 50.0,
            rent_fee: None,
            rule: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value.get("week_end"), Some(&json!("2024-05-08")));
        assert!(value.get("rent_fee").is_none());
        assert!(value.get("rule").is_none());

        let payload = CloseWeekPayload {
            rent_fee: Some(50.0),
            rule: Some(SplitRule::RentBeforeSplit),
            ..payload
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value.get("rent_fee"), Some(&json!(50.0)));
        assert_eq!(value.get("rule"), Some(&json!("rent_before_split")));
    }

    #[test]
    fn expense_filter_skips_empty_fields() {
        assert!(ExpenseFilter::default().query_pairs().is_empty());

        let filter = ExpenseFilter {
            start: "2024-05-01".to_string(),
            end: "2024-05-08".to_string(),
            partner: Some(Partner::Guilherme),
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("start", "2024-05-01".to_string()),
                ("end", "2024-05-08".to_string()),
                ("partner_name", "Guilherme".to_string()),
            ]
        );
    }

    #[test]
    fn expenses_deserialize_from_the_backend_shape() {
        let expense: Expense = serde_json::from_value(json!({
            "id": 1,
            "date": "2024-05-06",
            "amount": "42.50",
            "partner_name": "Guilherme",
            "platform": "iFood",
            "category": null,
            "note": null,
            "receipt_url": "https://example.com/nota.jpg",
            "created_at": "2024-05-06T12:00:00"
        }))
        .unwrap();
        assert_eq!(expense.partner_name, Partner::Guilherme);
        assert_eq!(expense.amount, "42.50");
        assert_eq!(expense.category, None);
    }
}
