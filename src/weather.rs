//! 天气查询
//!
//! 代理 wttr.in 的 `format=j1` JSON 接口：当前天气 + 三天预报
//! （取每天正午的条目）。描述优先用提供方的俄文字段，缺失时退回
//! 英文描述，由调用方决定是否再走翻译路径。

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::header;
use serde::{Deserialize, Serialize};

use crate::core::PerevodError;
use crate::network::fetch::BROWSER_USER_AGENT;

/// 描述缺失时的占位符
const NO_DESCRIPTION: &str = "—";

#[derive(Debug, Deserialize)]
struct WttrValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct WttrCondition {
    #[serde(rename = "temp_C")]
    temp_c: Option<String>,
    humidity: Option<String>,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: Option<String>,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WttrValue>,
    #[serde(rename = "lang_ru", default)]
    lang_ru: Vec<WttrValue>,
}

#[derive(Debug, Deserialize)]
struct WttrArea {
    #[serde(rename = "areaName", default)]
    area_name: Vec<WttrValue>,
}

#[derive(Debug, Deserialize)]
struct WttrHour {
    time: Option<String>,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WttrValue>,
    #[serde(rename = "lang_ru", default)]
    lang_ru: Vec<WttrValue>,
}

#[derive(Debug, Deserialize)]
struct WttrDay {
    date: Option<String>,
    #[serde(rename = "mintempC")]
    mintemp_c: Option<String>,
    #[serde(rename = "maxtempC")]
    maxtemp_c: Option<String>,
    #[serde(default)]
    hourly: Vec<WttrHour>,
}

#[derive(Debug, Deserialize)]
struct WttrReport {
    #[serde(rename = "current_condition", default)]
    current_condition: Vec<WttrCondition>,
    #[serde(rename = "nearest_area", default)]
    nearest_area: Vec<WttrArea>,
    #[serde(default)]
    weather: Vec<WttrDay>,
}

/// 当前天气
#[derive(Debug, Clone, Serialize)]
pub struct CurrentWeather {
    #[serde(rename = "tempC")]
    pub temp_c: Option<String>,
    pub humidity: Option<String>,
    #[serde(rename = "windKmph")]
    pub wind_kmph: Option<String>,
    pub desc: String,
}

/// 单日预报
#[derive(Debug, Clone, Serialize)]
pub struct ForecastDay {
    pub date: Option<String>,
    #[serde(rename = "minC")]
    pub min_c: Option<String>,
    #[serde(rename = "maxC")]
    pub max_c: Option<String>,
    pub desc: String,
}

/// 整理后的天气报告
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub location: String,
    pub current: CurrentWeather,
    pub forecast: Vec<ForecastDay>,
}

/// 抓取并整理指定城市的天气
pub async fn fetch_weather(
    client: &reqwest::Client,
    base_url: &str,
    city: &str,
) -> Result<WeatherReport, PerevodError> {
    let url = format!(
        "{}/{}?format=j1&lang=ru",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(city, NON_ALPHANUMERIC)
    );

    let response = client
        .get(&url)
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .header(header::ACCEPT_LANGUAGE, "ru")
        .send()
        .await
        .map_err(|e| PerevodError::Fetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(PerevodError::Fetch(format!(
            "HTTP {}",
            response.status().as_u16()
        )));
    }

    let raw: WttrReport = response
        .json()
        .await
        .map_err(|e| PerevodError::Fetch(e.to_string()))?;

    Ok(shape_report(raw, city))
}

/// 把提供方的原始结构整理成 API 响应形态
fn shape_report(raw: WttrReport, city: &str) -> WeatherReport {
    let current = raw.current_condition.first();

    let desc = current
        .map(|c| pick_description(&c.lang_ru, &c.weather_desc))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let location = raw
        .nearest_area
        .first()
        .and_then(|area| area.area_name.first())
        .map(|v| v.value.clone())
        .unwrap_or_else(|| city.to_string());

    let forecast = raw
        .weather
        .iter()
        .take(3)
        .map(|day| {
            let midday = day
                .hourly
                .iter()
                .find(|h| h.time.as_deref() == Some("1200"))
                .or_else(|| day.hourly.first());
            let desc = midday
                .map(|h| pick_description(&h.lang_ru, &h.weather_desc))
                .unwrap_or_else(|| NO_DESCRIPTION.to_string());
            ForecastDay {
                date: day.date.clone(),
                min_c: day.mintemp_c.clone(),
                max_c: day.maxtemp_c.clone(),
                desc,
            }
        })
        .collect();

    WeatherReport {
        location,
        current: CurrentWeather {
            temp_c: current.and_then(|c| c.temp_c.clone()),
            humidity: current.and_then(|c| c.humidity.clone()),
            wind_kmph: current.and_then(|c| c.windspeed_kmph.clone()),
            desc,
        },
        forecast,
    }
}

fn pick_description(lang_ru: &[WttrValue], weather_desc: &[WttrValue]) -> String {
    lang_ru
        .first()
        .or_else(|| weather_desc.first())
        .map(|v| v.value.clone())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "current_condition": [{
            "temp_C": "21",
            "humidity": "40",
            "windspeedKmph": "11",
            "weatherDesc": [{"value": "Partly cloudy"}],
            "lang_ru": [{"value": "Переменная облачность"}]
        }],
        "nearest_area": [{"areaName": [{"value": "Moscow"}]}],
        "weather": [
            {
                "date": "2024-05-01",
                "mintempC": "10",
                "maxtempC": "22",
                "hourly": [
                    {"time": "0", "weatherDesc": [{"value": "Clear"}], "lang_ru": []},
                    {"time": "1200", "weatherDesc": [{"value": "Sunny"}], "lang_ru": [{"value": "Солнечно"}]}
                ]
            },
            {
                "date": "2024-05-02",
                "mintempC": "11",
                "maxtempC": "20",
                "hourly": [{"time": "0", "weatherDesc": [{"value": "Rain"}], "lang_ru": []}]
            }
        ]
    }"#;

    #[test]
    fn test_shape_report() {
        let raw: WttrReport = serde_json::from_str(FIXTURE).unwrap();
        let report = shape_report(raw, "moscow");

        assert_eq!(report.location, "Moscow");
        assert_eq!(report.current.temp_c.as_deref(), Some("21"));
        assert_eq!(report.current.desc, "Переменная облачность");

        assert_eq!(report.forecast.len(), 2);
        // 取正午条目
        assert_eq!(report.forecast[0].desc, "Солнечно");
        // 没有正午条目时取第一条，俄文缺失时退回英文
        assert_eq!(report.forecast[1].desc, "Rain");
    }

    #[test]
    fn test_shape_report_empty_payload() {
        let raw: WttrReport = serde_json::from_str("{}").unwrap();
        let report = shape_report(raw, "nowhere");
        assert_eq!(report.location, "nowhere");
        assert_eq!(report.current.desc, "—");
        assert!(report.forecast.is_empty());
    }
}
