use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};
use yew::prelude::*;
use yew_icons::{Icon, IconId};

/// Columns and sample rows the backend expects, as a CSV every spreadsheet
/// tool can open. Dates follow the default import date format.
const TEMPLATE_CSV: &str = "\
First name,Last name,Email,Phone,Date of birth,Address
Jane,Doe,jane.doe@example.com,555-0100,01/01/1990,123 Main Street
John,Smith,john.smith@example.com,555-0101,15/03/1985,456 Central Avenue
";

const TEMPLATE_FILE_NAME: &str = "import_template.csv";

/// Offers the import template as a client-side download; nothing leaves the
/// browser.
#[function_component(TemplateCard)]
pub fn template_card() -> Html {
    let on_download = Callback::from(|_| {
        if let Err(err) = trigger_download() {
            web_sys::console::warn_1(&format!("Template download failed: {err}").into());
        }
    });

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body space-y-2">
                <h3 class="card-title">{"Import template"}</h3>
                <p class="text-sm text-base-content/70">
                    {"Download the template to prepare your data with the expected columns."}
                </p>
                <button class="btn btn-outline w-full gap-2" onclick={on_download}>
                    <Icon icon_id={IconId::HeroiconsOutlineArrowDownTray} width="1em" height="1em" />
                    {"Download template"}
                </button>
                <p class="text-xs text-base-content/60">
                    {"Includes the required columns and sample rows in the accepted format."}
                </p>
            </div>
        </div>
    }
}

/// Serve the template through a short-lived object URL on a synthetic
/// anchor click.
fn trigger_download() -> Result<(), String> {
    let parts = js_sys::Array::of1(&TEMPLATE_CSV.into());
    let options = BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| "could not build the template blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "could not create an object URL".to_string())?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "no document".to_string())?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "could not create the download link".to_string())?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(TEMPLATE_FILE_NAME);
    anchor.click();
    let _ = Url::revoke_object_url(&url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_rows_match_the_header() {
        let mut lines = TEMPLATE_CSV.lines();
        let header = lines.next().unwrap();
        let columns = header.split(',').count();

        assert_eq!(columns, 6);
        let mut sample_rows = 0;
        for line in lines {
            assert_eq!(line.split(',').count(), columns);
            sample_rows += 1;
        }
        assert_eq!(sample_rows, 2);
    }

    #[test]
    fn test_template_dates_use_the_default_format() {
        // Sample dates must parse with the default date_format so a user
        // who fills in the template needs no configuration changes.
        let format = shared::models::ImportConfig::default().date_format;
        for line in TEMPLATE_CSV.lines().skip(1) {
            let date = line.split(',').nth(4).unwrap();
            assert!(chrono::NaiveDate::parse_from_str(date, &format).is_ok());
        }
    }

    #[test]
    fn test_template_file_name_is_csv() {
        assert!(TEMPLATE_FILE_NAME.ends_with(".csv"));
    }
}
