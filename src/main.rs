use apihit::entry;
use apihit::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
