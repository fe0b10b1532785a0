//! Minimal copies of each site's results page and shared test setup

use torrent_ripple::config::Config;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A config whose endpoints all point at an address nothing listens on
pub fn offline_config() -> Config {
    let mut config = Config::default();
    config.sources.arc_url = "http://127.0.0.1:1".to_string();
    config.sources.td_url = "http://127.0.0.1:1".to_string();
    config.sources.otts_url = "http://127.0.0.1:1".to_string();
    config.sources.ygg_url = "http://127.0.0.1:1".to_string();
    config.sources.tpb_proxy_list_url = "http://127.0.0.1:1".to_string();
    config
}

/// Starts a server answering every GET with `status` and `body`
pub async fn serve_everything(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

pub fn archive_page(titles: &[(&str, &str)]) -> String {
    let items: String = titles
        .iter()
        .map(|(slug, title)| {
            format!(
                r#"<div class="item-ttl C C2"><a href="/details/{}"><div class="ttl">{}</div></a></div>"#,
                slug, title
            )
        })
        .collect();
    format!(r#"<html><body><div class="results">{}</div></body></html>"#, items)
}

pub fn x1337_page(rows: &[(&str, u32)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(name, seeders)| {
            format!(
                r#"<tr>
                  <td class="coll-1 name"><a href="/sub/1/0/" class="icon"></a><a href="/torrent/1/{name}/">{name}</a></td>
                  <td class="coll-2 seeds">{seeders}</td>
                  <td class="coll-3 leeches">1</td>
                  <td class="coll-date">Mar. 3rd '19</td>
                  <td class="coll-4 size">700 MB<span class="seeds">{seeders}</span></td>
                </tr>"#,
                name = name,
                seeders = seeders
            )
        })
        .collect();
    format!(
        r#"<html><body><table class="table-list"><tbody>{}</tbody></table></body></html>"#,
        rows
    )
}

pub fn ygg_page(rows: &[(&str, u32)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(name, seeders)| {
            format!(
                r#"<tr>
                  <td><a href="/cat">icon</a></td>
                  <td><a id="torrent_name" href="/torrent/ebook/1-{name}">{name}</a></td>
                  <td></td><td></td>
                  <td><div class="hidden">1552521600</div></td>
                  <td>1.1Go</td><td>10</td>
                  <td>{seeders}</td><td>0</td>
                </tr>"#,
                name = name,
                seeders = seeders
            )
        })
        .collect();
    format!(
        r#"<html><body><table class="table"><tbody>{}</tbody></table></body></html>"#,
        rows
    )
}

pub fn proxy_page(mirrors: &[String]) -> String {
    let rows: String = mirrors
        .iter()
        .map(|m| format!(r#"<tr><td><a class="site" href="{0}">{0}</a></td></tr>"#, m))
        .collect();
    format!(
        r#"<html><body><table class="proxies"><tbody>{}</tbody></table></body></html>"#,
        rows
    )
}

pub fn pirate_bay_page(rows: &[(&str, u32)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(name, seeders)| {
            format!(
                r#"<tr>
                  <td><a href="/browse/600">Other</a><a href="/browse/601">E-books</a></td>
                  <td><a class="detLink" href="/torrent/9/{name}">{name}</a>
                      <a href="magnet:?xt=urn:btih:{name}">M</a>
                      <font class="detDesc">Uploaded 03-14 2019, Size 2 GiB, ULed by x</font></td>
                  <td>{seeders}</td>
                  <td>2</td>
                </tr>"#,
                name = name,
                seeders = seeders
            )
        })
        .collect();
    format!(
        r#"<html><body><table id="searchResult"><tbody>{}<tr><td colspan="4">next</td></tr></tbody></table></body></html>"#,
        rows
    )
}
