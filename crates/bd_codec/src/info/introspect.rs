use alloc::borrow::Cow;
use alloc::format;
use alloc::vec::Vec;

use crate::error::{CodecError, DerivationError};
use crate::info::{FieldArgs, FieldDescriptor, Record, RecordInfo};

/// Returns the validated field descriptors of record `T`, in declaration order.
///
/// # Errors
///
/// [`DerivationError::NotARecord`] if two fields share a name or the
/// constructor parameters differ from the declared fields.
///
/// # Examples
///
/// ```
/// use bd_codec::derive::Record;
/// use bd_codec::info::describe;
///
/// #[derive(Record)]
/// struct Address {
///     city: String,
///     zip: i32,
/// }
///
/// let names: Vec<_> = describe::<Address>().unwrap().iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["city", "zip"]);
/// ```
pub fn describe<T: Record>() -> Result<&'static [FieldDescriptor], DerivationError> {
    describe_info(T::record_info())
}

/// [`describe`] over an already resolved [`RecordInfo`].
pub fn describe_info(
    info: &'static RecordInfo,
) -> Result<&'static [FieldDescriptor], DerivationError> {
    let fields = info.fields();

    let mut seen: Vec<&str> = Vec::with_capacity(fields.len());
    for field in fields {
        if seen.contains(&field.name()) {
            let reason = format!("duplicate field `{}`", field.name());
            return Err(not_a_record(info, reason.into()));
        }
        seen.push(field.name());
    }

    let params = info.params();
    let matches = params.len() == fields.len()
        && params.iter().all(|param| seen.contains(param));
    if !matches {
        return Err(not_a_record(
            info,
            "constructor parameters do not match the declared fields".into(),
        ));
    }

    Ok(fields)
}

/// Builds a `T` from named arguments.
///
/// # Errors
///
/// - [`CodecError::UnexpectedField`] if an argument is not a constructor parameter.
/// - [`CodecError::MissingRequiredField`] if a non-nullable parameter has no argument.
/// - Any error of [`Record::construct`].
pub fn construct<T: Record>(args: FieldArgs) -> Result<T, CodecError> {
    let info = T::record_info();

    if let Some(name) = args.names().find(|name| !info.params().contains(name)) {
        return Err(CodecError::UnexpectedField(name.into()));
    }

    if let Some(field) = info
        .fields()
        .iter()
        .find(|field| !field.is_nullable() && !args.contains(field.name()))
    {
        return Err(CodecError::MissingRequiredField(field.name().into()));
    }

    T::construct(args)
}

#[inline]
fn not_a_record(info: &RecordInfo, reason: Cow<'static, str>) -> DerivationError {
    DerivationError::NotARecord {
        type_path: info.type_path(),
        reason,
    }
}
