use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};

use crate::domain::types::Semester;
use crate::models::config::ServerConfig;
use crate::sugang::error::SugangError;
use crate::sugang::lecture_info::LectureInfo;
use crate::sugang::{CourseSource, ExportLanguage};

const EXCEL_DOWNLOAD_PATH: &str = "/sugang/cc/cc100InterfaceExcel.action";
const LECTURE_INFO_PATH: &str = "/sugang/cc/cc101ajax.action";

/// Fixed query of the export endpoint. Empty filters select every course.
const EXCEL_DOWNLOAD_PARAMS: &[(&str, &str)] = &[
    ("seeMore", "더보기"),
    ("srchBdNo", ""),
    ("srchCamp", ""),
    ("srchOpenSbjtFldCd", ""),
    ("srchCptnCorsFg", ""),
    ("srchCurrPage", "1"),
    ("srchExcept", ""),
    ("srchGenrlRemoteLtYn", ""),
    ("srchIsEngSbjt", ""),
    ("srchIsPendingCourse", ""),
    ("srchLsnProgType", ""),
    ("srchMrksApprMthdChgPosbYn", ""),
    ("srchMrksGvMthd", ""),
    ("srchOpenUpDeptCd", ""),
    ("srchOpenMjCd", ""),
    ("srchOpenPntMax", ""),
    ("srchOpenPntMin", ""),
    ("srchOpenSbjtDayNm", ""),
    ("srchOpenSbjtNm", ""),
    ("srchOpenSbjtTm", ""),
    ("srchOpenSbjtTmNm", ""),
    ("srchOpenShyr", ""),
    ("srchOpenSubmattCorsFg", ""),
    ("srchOpenSubmattFgCd1", ""),
    ("srchOpenSubmattFgCd2", ""),
    ("srchOpenSubmattFgCd3", ""),
    ("srchOpenSubmattFgCd4", ""),
    ("srchOpenSubmattFgCd5", ""),
    ("srchOpenSubmattFgCd6", ""),
    ("srchOpenSubmattFgCd7", ""),
    ("srchOpenSubmattFgCd8", ""),
    ("srchOpenSubmattFgCd9", ""),
    ("srchOpenDeptCd", ""),
    ("srchOpenUpSbjtFldCd", ""),
    ("srchPageSize", "9999"),
    ("srchProfNm", ""),
    ("srchSbjtCd", ""),
    ("srchSbjtNm", ""),
    ("srchTlsnAplyCapaCntMax", ""),
    ("srchTlsnAplyCapaCntMin", ""),
    ("srchTlsnRcntMax", ""),
    ("srchTlsnRcntMin", ""),
    ("workType", "EX"),
];

const LECTURE_INFO_PARAMS: &[(&str, &str)] = &[
    ("t_profPersNo", ""),
    ("workType", " "),
    ("sbjtSubhCd", "000"),
];

/// Search code identifying a term on the registration site.
pub const fn semester_search_code(semester: Semester) -> &'static str {
    match semester {
        Semester::Spring => "U000200001U000300001",
        Semester::Summer => "U000200001U000300002",
        Semester::Fall => "U000200002U000300001",
        Semester::Winter => "U000200002U000300002",
    }
}

/// Splits a search code into the term and sub-term parts used by the
/// lecture lookup.
pub fn split_search_code(code: &str) -> (&str, &str) {
    code.split_at(code.len().min(10))
}

/// HTTP client for `sugang.snu.ac.kr`.
#[derive(Clone)]
pub struct SugangClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl SugangClient {
    pub fn new(config: &ServerConfig) -> Result<Self, SugangError> {
        let referer = format!("{}{EXCEL_DOWNLOAD_PATH}", config.sugang_base_url);

        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&referer) {
            headers.insert(REFERER, value);
        }

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.sugang_base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl CourseSource for SugangClient {
    async fn download_courses_excel(
        &self,
        year: i32,
        semester: Semester,
        language: ExportLanguage,
    ) -> Result<Vec<u8>, SugangError> {
        let year = year.to_string();
        let bytes = self
            .client
            .get(self.url(EXCEL_DOWNLOAD_PATH))
            .query(EXCEL_DOWNLOAD_PARAMS)
            .query(&[
                ("srchLanguage", language.as_str()),
                ("srchOpenSchyy", year.as_str()),
                ("srchOpenShtm", semester_search_code(semester)),
            ])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(bytes.to_vec())
    }

    async fn get_lecture_info(
        &self,
        year: i32,
        semester: Semester,
        course_number: &str,
        lecture_number: &str,
    ) -> Result<LectureInfo, SugangError> {
        let year = year.to_string();
        let (term, sub_term) = split_search_code(semester_search_code(semester));

        let body = self
            .client
            .get(self.url(LECTURE_INFO_PATH))
            .timeout(self.request_timeout)
            .query(LECTURE_INFO_PARAMS)
            .query(&[
                ("openSchyy", year.as_str()),
                ("openShtmFg", term),
                ("openDetaShtmFg", sub_term),
                ("sbjtCd", course_number),
                ("ltNo", lecture_number),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(serde_json::from_str(&body)?)
    }
}
